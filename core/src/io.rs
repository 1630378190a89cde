//! Line-oriented streaming over readers, and the pipe producer/consumer pair
//! used by the `ByLine_Pipes` case.

use anyhow::{Context, Result, anyhow, ensure};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

const STARTUP_SIGNAL: u8 = b'x';

/// Lines of a reader with the trailing `\n` (and `\r\n`) stripped.
pub struct ByLine<R> {
    reader: BufReader<R>,
}

pub fn by_line<R: Read>(reader: R) -> ByLine<R> {
    ByLine {
        reader: BufReader::new(reader),
    }
}

impl<R: Read> Iterator for ByLine<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(Ok(line))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Parse each line into `T`, keeping the offending line in the error.
pub fn parse_each<T, I>(lines: I) -> impl Iterator<Item = Result<T>>
where
    I: Iterator<Item = io::Result<String>>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lines.map(|line| {
        let line = line.context("read line")?;
        line.trim()
            .parse::<T>()
            .with_context(|| format!("parse line '{}'", line))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeRun {
    pub sum: i64,
    /// Time spent consuming, excluding thread spawn and startup handshake.
    pub elapsed: Duration,
}

/// Stream `1..=count` through an anonymous pipe from a producer thread and
/// sum it on the calling thread.
pub fn pipe_sum(count: u64) -> Result<PipeRun> {
    let expected = closed_form_sum(count)?;
    let (mut reader, writer) = io::pipe().context("create pipe")?;

    let producer = thread::Builder::new()
        .name("genbench-pipe-producer".to_string())
        .spawn(move || produce_lines(writer, count))
        .context("spawn pipe producer")?;

    let mut signal = [0u8; 1];
    reader.read_exact(&mut signal).context("wait for producer startup")?;
    ensure!(
        signal[0] == STARTUP_SIGNAL,
        "unexpected startup byte {:#04x} from pipe producer",
        signal[0]
    );

    let start = Instant::now();
    let sum = parse_each::<i64, _>(by_line(&mut reader)).sum::<Result<i64>>();
    let elapsed = start.elapsed();
    drop(reader);

    let produced = producer.join().map_err(|_| anyhow!("pipe producer panicked"))?;
    let sum = sum.context("consume pipe")?;
    produced.context("pipe producer failed")?;

    ensure!(sum == expected, "pipe sum {} does not match expected {}", sum, expected);
    tracing::trace!(target: "genbench::io", count, ?elapsed, "pipe drained");

    Ok(PipeRun { sum, elapsed })
}

/// `1 + 2 + .. + count`, rejected when it does not fit in `i64`; every
/// partial sum of the stream is then in range too.
fn closed_form_sum(count: u64) -> Result<i64> {
    let n = i64::try_from(count).context("line count exceeds i64")?;
    n.checked_add(1)
        .and_then(|next| if n % 2 == 0 { (n / 2).checked_mul(next) } else { n.checked_mul(next / 2) })
        .with_context(|| format!("sum of 1..={} overflows i64", count))
}

fn produce_lines<W: Write>(mut writer: W, count: u64) -> io::Result<()> {
    writer.write_all(&[STARTUP_SIGNAL])?;
    writer.flush()?;
    let mut out = BufWriter::new(writer);
    for i in 1..=count {
        writeln!(out, "{}", i)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_line_strips_newlines() {
        let input = "one\ntwo\r\n\nlast";
        let lines: Vec<String> = by_line(input.as_bytes()).collect::<io::Result<_>>().unwrap();
        assert_eq!(lines, vec!["one", "two", "", "last"]);
    }

    #[test]
    fn test_by_line_empty_input() {
        assert_eq!(by_line(&b""[..]).count(), 0);
    }

    #[test]
    fn test_parse_each_sums() -> Result<()> {
        let total: i64 = parse_each::<i64, _>(by_line("1\n2\n3\n".as_bytes())).sum::<Result<i64>>()?;
        assert_eq!(total, 6);
        Ok(())
    }

    #[test]
    fn test_parse_each_reports_line() {
        let err = parse_each::<i64, _>(by_line("1\nnope\n".as_bytes()))
            .sum::<Result<i64>>()
            .unwrap_err();
        assert!(format!("{:#}", err).contains("parse line 'nope'"));
    }

    #[test]
    fn test_pipe_sum_closed_form() -> Result<()> {
        for count in [0u64, 1, 2, 1000] {
            let run = pipe_sum(count)?;
            let n = count as i64;
            assert_eq!(run.sum, n * (n + 1) / 2);
        }
        Ok(())
    }

    #[test]
    fn test_closed_form_sum_limits() -> Result<()> {
        assert_eq!(closed_form_sum(0)?, 0);
        assert_eq!(closed_form_sum(4)?, 10);
        assert_eq!(closed_form_sum(3_000_000_000)?, 4_500_000_001_500_000_000);
        assert!(closed_form_sum(4_294_967_296).is_err());
        Ok(())
    }

    #[test]
    fn test_pipe_sum_rejects_overflowing_count() {
        let err = pipe_sum(u64::MAX).unwrap_err();
        assert!(format!("{:#}", err).contains("exceeds i64"));
        let err = pipe_sum(5_000_000_000).unwrap_err();
        assert!(format!("{:#}", err).contains("overflows i64"));
    }

    #[test]
    fn test_produce_lines_format() -> Result<()> {
        let mut buf = Vec::new();
        produce_lines(&mut buf, 3)?;
        assert_eq!(buf, b"x1\n2\n3\n");
        Ok(())
    }
}
