//! Training samples and their JSON-lines form.

use std::io::{self, Write};

use feature_planes::FeatureTensor;
use serde::{Deserialize, Serialize};

/// One labelled training position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub fen: String,
    /// Pawns, positive favoring white
    pub evaluation: f32,
    /// Skill levels of white and black in the game that produced `fen`
    pub skills: [u8; 2],
    /// Plies played to reach `fen`
    pub plies: u32,
    /// The (8, 8, 3) feature planes of `fen`
    pub tensor: FeatureTensor,
}

impl Sample {
    /// Writes the sample as one JSON line.
    pub fn write_line<W: Write>(&self, mut out: W) -> io::Result<()> {
        serde_json::to_writer(&mut out, self)?;
        out.write_all(b"\n")
    }

    pub fn from_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

/// Running totals for a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatagenStats {
    pub samples: usize,
    /// Positions dropped because their evaluation was a forced mate
    pub discarded: usize,
    /// Positions whose game ended on the board and were rolled back a ply
    pub backed_off: usize,
}

impl DatagenStats {
    pub fn report(&self) -> String {
        format!(
            "{} samples, {} discarded on mate scores, {} backed off from finished games",
            self.samples, self.discarded, self.backed_off
        )
    }
}
