use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::kernel::telemetry::event::TelemetryEvent;
use crate::kernel::telemetry::recorder::TelemetryRecorder;
use crate::skill::handler::SkillHandler;

/// Local harness standing in for the host: one JSON request envelope per input
/// line, one JSON response per output line. Returns the number of turns served.
///
/// A line that fails to decode is answered with the fallback response; the loop
/// only stops on end of input or an I/O error.
pub async fn serve<R, W>(
    handler: &SkillHandler,
    reader: R,
    mut writer: W,
    recorder: &mut TelemetryRecorder,
) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut turns = 0u64;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match handler.handle_json(&line) {
            Ok(outcome) => {
                recorder.extend(outcome.telemetry);
                outcome.response
            }
            Err(e) => {
                warn!("Undecodable request: {}", e);
                recorder.record(TelemetryEvent::DecodeFailure);
                handler.fallback_response()
            }
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
        turns += 1;
    }

    info!(turns, "Input closed");
    Ok(turns)
}
