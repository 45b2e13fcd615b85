use std::collections::HashMap;
use std::io::Write;

use crate::image::{ChannelValue, ColorChannel};

/// Occurrence count per distinct channel value, kept in order of first
/// occurrence.
#[derive(Debug, Default)]
pub struct Histogram {
    positions: HashMap<ChannelValue, usize>,
    counts: Vec<(ChannelValue, usize)>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: ChannelValue) {
        match self.positions.get(&value) {
            Some(&position) => self.counts[position].1 += 1,
            None => {
                self.positions.insert(value, self.counts.len());
                self.counts.push((value, 1));
            }
        }
    }

    pub fn record_all(&mut self, values: &[ChannelValue]) {
        for &value in values {
            self.record(value);
        }
    }

    pub fn count(&self, value: ChannelValue) -> usize {
        self.positions
            .get(&value)
            .map_or(0, |&position| self.counts[position].1)
    }

    pub fn distinct_values(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ChannelValue, usize)> {
        self.counts.iter()
    }

    /// Writes the tab separated report, headed by `<channel>\tcount`.
    pub fn write_report<W: Write>(
        &self,
        channel: ColorChannel,
        writer: &mut W,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}\tcount", channel.name())?;
        for (value, count) in self.iter() {
            writeln!(writer, "{}\t{}", value, count)?;
        }
        writer.flush()
    }
}

#[cfg(test)]
mod test {
    use super::Histogram;
    use crate::image::ColorChannel;

    #[test]
    fn counts_repeated_values() {
        let values = [3, 7, 3, 3, 0, 7, 255];
        let mut histogram = Histogram::new();
        histogram.record_all(&values);
        assert_eq!(histogram.total(), values.len());
        assert_eq!(histogram.distinct_values(), 4);
        assert_eq!(histogram.count(3), 3);
        assert_eq!(histogram.count(7), 2);
        assert_eq!(histogram.count(0), 1);
        assert_eq!(histogram.count(255), 1);
        assert_eq!(histogram.count(42), 0);
    }

    #[test]
    fn keeps_first_occurrence_order() {
        let mut histogram = Histogram::new();
        histogram.record_all(&[9, 1, 9, 5, 1]);
        let order: Vec<u16> = histogram.iter().map(|(value, _)| *value).collect();
        assert_eq!(order, vec![9, 1, 5]);
    }

    #[test]
    fn report_layout() {
        let mut histogram = Histogram::new();
        histogram.record_all(&[1, 4, 1]);
        let mut output = Vec::new();
        histogram
            .write_report(ColorChannel::Red, &mut output)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "red\tcount\n1\t2\n4\t1\n");
    }

    #[test]
    fn empty_report_has_header_only() {
        let mut output = Vec::new();
        Histogram::new()
            .write_report(ColorChannel::Blue, &mut output)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "blue\tcount\n");
    }
}
