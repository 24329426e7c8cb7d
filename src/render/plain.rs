use std::io::{self, Write};
use std::time::Instant;

use crate::ticker::Ticker;
use crate::torus::Rasterizer;

/// Writes one frame as text rows followed by a blank separator line.
pub fn write_frame(lines: &[String], out: &mut impl Write) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}

/// Streams torus frames to `out` without any terminal control.
///
/// `ticker` paces the output; pass `None` to emit frames back to back.
/// Runs forever when `frames` is `None`.
pub fn run_plain(
    rasterizer: &mut Rasterizer,
    frames: Option<u64>,
    mut ticker: Option<Ticker>,
    out: &mut impl Write,
) -> io::Result<u64> {
    let mut emitted = 0u64;
    while frames.map_or(true, |limit| emitted < limit) {
        if let Some(ticker) = ticker.as_mut() {
            let now = Instant::now();
            if !ticker.due(now) {
                if let Some(wait) = ticker.time_until_due(now) {
                    std::thread::sleep(wait);
                }
                continue;
            }
        }
        let lines = rasterizer.tick();
        write_frame(&lines, out)?;
        out.flush()?;
        emitted += 1;
    }
    Ok(emitted)
}
