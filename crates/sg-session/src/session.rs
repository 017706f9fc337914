use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;
use sg_align::{Correspondence, Eye, PointPicker, apply_offset, resolve_correspondence};
use sg_composite::Compositor;
use sg_core::{Frame, Offset};

use crate::config::SessionConfig;
use crate::error::{StereoError, StereoResult};
use crate::io::load_frame;
use crate::store::{OutputStore, next_available_name};

/// Left-eye and right-eye photographs of one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoPair {
    left: Frame,
    right: Frame,
}

impl StereoPair {
    pub fn new(left: Frame, right: Frame) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &Frame {
        &self.left
    }

    pub fn right(&self) -> &Frame {
        &self.right
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Unaligned,
    Aligned {
        offset: Offset,
        correspondence: Option<Correspondence>,
    },
}

/// A composite that was written to an output store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedOutput {
    pub compositor: Compositor,
    pub path: PathBuf,
    pub width: usize,
    pub height: usize,
}

/// Summary of one run, suitable for writing next to the outputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub input_sizes: [[usize; 2]; 2],
    pub offset: Offset,
    pub correspondence: Option<Correspondence>,
    pub aligned_size: [usize; 2],
    pub outputs: Vec<SavedOutput>,
}

/// Owns a stereo pair from loading through alignment to output.
///
/// The pair is replaced at most once, by alignment. Compositors only read
/// it, and outputs are written strictly in the order requested.
#[derive(Debug, Clone)]
pub struct StereoSession {
    pair: StereoPair,
    input_sizes: [[usize; 2]; 2],
    alignment: Alignment,
    config: SessionConfig,
}

impl StereoSession {
    pub fn new(pair: StereoPair, config: SessionConfig) -> Self {
        let input_sizes = [dims(pair.left()), dims(pair.right())];
        Self {
            pair,
            input_sizes,
            alignment: Alignment::Unaligned,
            config,
        }
    }

    /// Loads both photographs from disk.
    pub fn open(left: &Path, right: &Path, config: SessionConfig) -> StereoResult<Self> {
        info!("loading left eye's image from {}", left.display());
        let left = load_frame(left, Eye::Left)?;
        info!("loading right eye's image from {}", right.display());
        let right = load_frame(right, Eye::Right)?;
        Ok(Self::new(StereoPair::new(left, right), config))
    }

    /// Starts a new session from the current state of `other`.
    pub fn from_existing(other: &StereoSession) -> Self {
        other.clone()
    }

    pub fn pair(&self) -> &StereoPair {
        &self.pair
    }

    pub fn is_aligned(&self) -> bool {
        matches!(self.alignment, Alignment::Aligned { .. })
    }

    /// Offset applied to the pair; `(0, 0)` when alignment was skipped.
    pub fn offset(&self) -> Offset {
        match self.alignment {
            Alignment::Unaligned => Offset::ZERO,
            Alignment::Aligned { offset, .. } => offset,
        }
    }

    pub fn correspondence(&self) -> Option<Correspondence> {
        match self.alignment {
            Alignment::Unaligned => None,
            Alignment::Aligned { correspondence, .. } => correspondence,
        }
    }

    /// Asks `picker` for one click per photograph and registers the pair on
    /// the clicked feature.
    ///
    /// On error the pair is left untouched, so the caller may ask again.
    pub fn align_with<P: PointPicker + ?Sized>(&mut self, picker: &mut P) -> StereoResult<Offset> {
        self.ensure_unaligned()?;
        let clicks = picker.pick(self.pair.left(), self.pair.right())?;
        let correspondence = resolve_correspondence(&clicks)?;
        info!(
            "left image clicked at {}, right image clicked at {}",
            correspondence.left, correspondence.right
        );
        let offset = correspondence.offset();
        self.register(offset, Some(correspondence))?;
        Ok(offset)
    }

    /// Registers the pair with an offset measured elsewhere.
    pub fn align(&mut self, offset: Offset) -> StereoResult<()> {
        self.ensure_unaligned()?;
        self.register(offset, None)
    }

    fn ensure_unaligned(&self) -> StereoResult<()> {
        match self.alignment {
            Alignment::Unaligned => Ok(()),
            Alignment::Aligned { offset, .. } => Err(StereoError::AlreadyAligned { offset }),
        }
    }

    fn register(
        &mut self,
        offset: Offset,
        correspondence: Option<Correspondence>,
    ) -> StereoResult<()> {
        info!("applying a nudge of {offset} pixels between the two images");
        let (left, right) = apply_offset(self.pair.left(), self.pair.right(), offset)?;
        debug!("aligned pair is {}x{}", left.width(), left.height());
        self.pair = StereoPair::new(left, right);
        self.alignment = Alignment::Aligned {
            offset,
            correspondence,
        };
        Ok(())
    }

    pub fn render(&self, compositor: Compositor) -> StereoResult<Frame> {
        Ok(compositor.compose(self.pair.left(), self.pair.right())?)
    }

    /// Renders one composite and saves it under the first free name.
    pub fn write<S: OutputStore + ?Sized>(
        &self,
        compositor: Compositor,
        store: &mut S,
    ) -> StereoResult<SavedOutput> {
        info!("saving stereo image in {compositor} format");
        let frame = self.render(compositor)?;
        let name = next_available_name(
            store,
            &self.config.prefix,
            compositor.label(),
            &self.config.extension,
        );
        let path = store.save(&frame, &name)?;
        info!("saved to {}", path.display());

        Ok(SavedOutput {
            compositor,
            path,
            width: frame.width(),
            height: frame.height(),
        })
    }

    /// Writes each compositor in turn, stopping at the first failure.
    pub fn write_all<S: OutputStore + ?Sized>(
        &self,
        compositors: &[Compositor],
        store: &mut S,
    ) -> StereoResult<Vec<SavedOutput>> {
        compositors
            .iter()
            .map(|&compositor| self.write(compositor, store))
            .collect()
    }

    pub fn report(&self, outputs: &[SavedOutput]) -> SessionReport {
        SessionReport {
            input_sizes: self.input_sizes,
            offset: self.offset(),
            correspondence: self.correspondence(),
            aligned_size: dims(self.pair.left()),
            outputs: outputs.to_vec(),
        }
    }
}

fn dims(frame: &Frame) -> [usize; 2] {
    [frame.width(), frame.height()]
}
