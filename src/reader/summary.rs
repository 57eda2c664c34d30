use std::collections::BTreeMap;
use std::fmt;

/// What a read call kept and what it passed over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadSummary {
    /// Features seen, including skipped ones
    pub features: usize,
    pub polygons: usize,
    /// Non-polygon geometries by type name
    pub skipped: BTreeMap<String, usize>,
    /// Features whose geometry was `null` or absent
    pub unlocated: usize,
    /// Interior rings (holes) that were not carried into the output
    pub holes_dropped: usize,
}

impl ReadSummary {
    pub(crate) fn record_skipped(&mut self, type_name: &str) {
        *self.skipped.entry(type_name.to_string()).or_insert(0) += 1;
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Combine counts from another read, for multi-file totals
    pub fn merge(&mut self, other: &ReadSummary) {
        self.features += other.features;
        self.polygons += other.polygons;
        self.unlocated += other.unlocated;
        self.holes_dropped += other.holes_dropped;
        for (name, count) in &other.skipped {
            *self.skipped.entry(name.clone()).or_insert(0) += count;
        }
    }
}

impl fmt::Display for ReadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} polygon(s) from {} feature(s)",
            self.polygons, self.features
        )?;
        if !self.skipped.is_empty() {
            let parts: Vec<String> = self
                .skipped
                .iter()
                .map(|(name, count)| format!("{count} {name}"))
                .collect();
            write!(f, ", skipped {}", parts.join(", "))?;
        }
        if self.unlocated > 0 {
            write!(f, ", {} without geometry", self.unlocated)?;
        }
        if self.holes_dropped > 0 {
            write!(f, ", {} hole(s) dropped", self.holes_dropped)?;
        }
        Ok(())
    }
}
