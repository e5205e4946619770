use crate::advisor::{Answers, CourseEntry};

pub const DIVISION_QUESTION: &str = "Do you want a lower division or upper division course?";

pub const LOWER_DIVISION: &str = "There are 4 essential lower division courses. You can take C.S. 61 A., C.S. 61 B., C.S. 61 C., or C.S. 70. I hope you have a better idea of what classes you might be interested in. Enjoy!";

pub const BYE: &str = "Bye";

pub const HELP_REPROMPT: &str = "recommend a course";

pub fn welcome(skill_name: &str) -> String {
    format!(
        "Welcome to {}. I will recommend the best course for you. {}",
        skill_name, DIVISION_QUESTION
    )
}

pub fn help(skill_name: &str) -> String {
    format!(
        "This is {}. I can help you find a computer science course to take. You can say, recommend a course.",
        skill_name
    )
}

pub fn unhandled(skill_name: &str) -> String {
    format!(
        "Sorry, I didn't get that. You can try: 'alexa, tell {} to recommend a course.'",
        skill_name
    )
}

/// PURE FUNCTION: answers + looked-up course -> spoken recommendation.
/// A missing course yields an explicit no-recommendation sentence.
pub fn recommendation(answers: &Answers, entry: Option<CourseEntry>) -> String {
    let Some(entry) = entry else {
        return no_recommendation();
    };

    let working = if answers.interaction == "groups" {
        "in groups"
    } else {
        "individually"
    };

    format!(
        "Given that you are interested in {}, you want a course with a {} time commitment, \
         you like working {} and relevance to internships is {} to you, \
         you should consider taking {}. {}. Enjoy your courses!",
        answers.topic_importance,
        answers.time,
        working,
        answers.internship,
        entry.course.name,
        entry.course.description.trim_end_matches('.'),
    )
}

pub fn no_recommendation() -> String {
    "Sorry, I don't have a course recommendation for that combination yet. You can say, recommend a course, to try again.".to_string()
}
