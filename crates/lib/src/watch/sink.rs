use super::classify::LineStyle;

/// Receives every compiler output line, already classified.
pub trait OutputSink {
  fn line(&mut self, line: &str, style: LineStyle);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
  fn line(&mut self, line: &str, style: LineStyle) {
    (**self).line(line, style);
  }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
  pub lines: Vec<(String, LineStyle)>,
}

impl OutputSink for MemorySink {
  fn line(&mut self, line: &str, style: LineStyle) {
    self.lines.push((line.to_string(), style));
  }
}
