use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Append-style cost log: one `<iteration> <average_cost>` line per
/// training step, for the lifetime of one training call.
pub struct CostLog {
    out: BufWriter<File>,
}

impl CostLog {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let out = BufWriter::new(File::create(path)?);
        Ok(Self { out })
    }

    pub fn record(&mut self, iteration: usize, average_cost: f64) -> io::Result<()> {
        writeln!(self.out, "{iteration} {average_cost}")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
