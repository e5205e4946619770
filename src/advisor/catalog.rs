use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Course {
    pub name: &'static str,
    pub description: &'static str,
}

/// A course together with its row in the course table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseEntry {
    pub index: usize,
    pub course: &'static Course,
}

const fn course(name: &'static str, description: &'static str) -> Option<Course> {
    Some(Course { name, description })
}

// Row positions are referenced by KEY_INDEX; unused rows stay as placeholders.
static COURSES: [Option<Course>; 21] = [
    None,
    None,
    course(
        "C.S. 160",
        "C.S. 160 teaches an introduction to human-computer interaction and user interface design. The course covers how to prototype, evaluate, and design user interfaces.",
    ),
    course(
        "C.S. 162",
        "C.S. 162 teaches operating systems. This course covers operating systems, systems programming, networked and distributed systems, and storage systems.",
    ),
    course(
        "C.S. 164",
        "C.S. 164 teaches programming languages and compilers. This course covers the design of programming languages and the implementation of translators for them.",
    ),
    course(
        "C.S. 161",
        "C.S. 161 teaches computer security. This course covers security in a variety of domains, including the web, networking, operating systems, and cryptography.",
    ),
    course(
        "C.S. 169",
        "C.S. 169 teaches software engineering. This course covers processes for software development, design patterns, and testing methodologies.",
    ),
    course(
        "C.S. 168",
        "C.S. 168 teaches an introduction to the internet. This course covers topics such as layering, addressing, intradomain routing, interdomain routing, reliable delivery, congestion control, and the core protocols.",
    ),
    course(
        "C.S. 174",
        "C.S. 174 teaches combinatorics and discrete probability. This course covers topics such as markov chains, probability distributions, and graph algorithms.",
    ),
    course(
        "C.S. 170",
        "C.S. 170 teaches efficient algorithms and intractable problems. This course covers topics such as algorithm design, algorithmic proofs, and running time analysis.",
    ),
    course(
        "C.S. 172",
        "C.S. 172 teaches computability and complexity. This course covers three main areas: automata theory, computability theory, and complexity theory.",
    ),
    None,
    course(
        "C.S. 191",
        "C.S. 191 teaches quantum information science and technology. This course provides a broad introduction to quantum computation theory, quantum algorithms, and physical implementations.",
    ),
    course(
        "C.S. 176",
        "C.S. 176 teaches algorithms for computational biology. This course covers topics such as genome searching, DNA alignment, evolutionary tree of life, and detecting coding regions.",
    ),
    None,
    None,
    course(
        "C.S. 189",
        "C.S. 189 teaches an introduciton to machine learning. This course covers topics such as supervised methods for regression and classification, generative and discriminative probabilistic models, and Bayesian parametric learning",
    ),
    course(
        "C.S. 186",
        "C.S. 186 teaches an introduction to database systems. This course covers topics such as database design and application.",
    ),
    course(
        "C.S. 184",
        "C.S. 184 teaches foundations of computer graphics. This course covers topics such as object hiearchies, interactive input techniques, and animation.",
    ),
    course(
        "C.S. 188",
        "C.S. 188 teaches an introduciton to artificial intelligence. This course covers basic ideas and techniques underlying the design of intelligent computer systems with a specific emphasis on the statistical and decision-theoretic modeling paradigm.",
    ),
    None,
];

/// topicImportance-time-interaction-internship -> row in COURSES.
static KEY_INDEX: [(&str, usize); 24] = [
    ("software-heavy-individually-unimportant", 3),
    ("software-heavy-individually-important", 5),
    ("software-heavy-groups-unimportant", 2),
    ("software-heavy-groups-important", 3),
    ("software-light-individually-unimportant", 4),
    ("software-light-individually-important", 5),
    ("software-light-groups-unimportant", 6),
    ("software-light-groups-important", 7),
    ("theory-heavy-individually-unimportant", 8),
    ("theory-heavy-individually-important", 9),
    ("theory-heavy-groups-unimportant", 10),
    ("theory-heavy-groups-important", 9),
    ("theory-light-individually-unimportant", 12),
    ("theory-light-individually-important", 13),
    ("theory-light-groups-unimportant", 12),
    ("theory-light-groups-important", 13),
    ("application-heavy-individually-unimportant", 16),
    ("application-heavy-individually-important", 17),
    ("application-heavy-groups-unimportant", 18),
    ("application-heavy-groups-important", 18),
    ("application-light-individually-unimportant", 17),
    ("application-light-individually-important", 17),
    ("application-light-groups-unimportant", 19),
    ("application-light-groups-important", 19),
];

/// Lookup key built from the four answers in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey(String);

impl CompositeKey {
    pub const DELIMITER: &'static str = "-";

    pub fn new(topic_importance: &str, time: &str, interaction: &str, internship: &str) -> Self {
        let parts = [topic_importance, time, interaction, internship];
        Self(parts.join(Self::DELIMITER))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CompositeKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Course for `key`, or `None` when the combination is not in the table.
pub fn lookup(key: &CompositeKey) -> Option<CourseEntry> {
    let index = KEY_INDEX
        .iter()
        .find(|(k, _)| *k == key.as_str())
        .map(|(_, index)| *index)?;
    course_at(index).map(|course| CourseEntry { index, course })
}

pub fn course_at(index: usize) -> Option<&'static Course> {
    COURSES.get(index).and_then(Option::as_ref)
}

pub fn keys() -> impl Iterator<Item = (&'static str, usize)> {
    KEY_INDEX.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_points_at_a_real_course() {
        for (key, index) in keys() {
            let entry = lookup(&CompositeKey::from(key))
                .unwrap_or_else(|| panic!("{} has no course", key));
            assert_eq!(entry.index, index);
            assert!(entry.course.name.starts_with("C.S. "));
        }
    }

    #[test]
    fn key_joins_in_fixed_order() {
        let key = CompositeKey::new("theory", "light", "groups", "important");
        assert_eq!(key.as_str(), "theory-light-groups-important");
    }

    #[test]
    fn placeholder_rows_are_empty() {
        assert!(course_at(0).is_none());
        assert!(course_at(11).is_none());
        assert!(course_at(21).is_none());
    }
}
