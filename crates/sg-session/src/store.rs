use std::fs;
use std::path::PathBuf;

use sg_core::Frame;

use crate::error::{StereoError, StereoResult};
use crate::io::save_frame;

pub fn output_file_name(prefix: &str, label: &str, index: usize, extension: &str) -> String {
    format!("{prefix}_{label}_{index:03}.{extension}")
}

/// Destination for composites, addressed by file name.
pub trait OutputStore {
    fn exists(&self, name: &str) -> bool;

    /// Writes `frame` under `name` and returns where it ended up.
    fn save(&mut self, frame: &Frame, name: &str) -> StereoResult<PathBuf>;
}

/// Returns the first name in the `000`, `001`, ... sequence that the store
/// does not hold yet.
///
/// This is a check-then-act scan. Two processes writing into the same store
/// can both pick the same name, and the later write wins.
pub fn next_available_name<S: OutputStore + ?Sized>(
    store: &S,
    prefix: &str,
    label: &str,
    extension: &str,
) -> String {
    let mut index = 0usize;
    loop {
        let name = output_file_name(prefix, label, index, extension);
        if !store.exists(&name) {
            return name;
        }
        index += 1;
    }
}

/// Plain directory on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl OutputStore for FsStore {
    fn exists(&self, name: &str) -> bool {
        self.dir.join(name).exists()
    }

    fn save(&mut self, frame: &Frame, name: &str) -> StereoResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| StereoError::ImageSave {
            path: self.dir.clone(),
            source: image::ImageError::IoError(source),
        })?;
        let path = self.dir.join(name);
        save_frame(frame, &path)?;
        Ok(path)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use sg_core::Frame;

    use super::{FsStore, OutputStore, next_available_name, output_file_name};
    use crate::error::{StereoError, StereoResult};

    /// Keeps saved frames in memory, keyed by name.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        pub(crate) frames: BTreeMap<String, Frame>,
        pub(crate) order: Vec<String>,
    }

    impl OutputStore for MemoryStore {
        fn exists(&self, name: &str) -> bool {
            self.frames.contains_key(name)
        }

        fn save(&mut self, frame: &Frame, name: &str) -> StereoResult<PathBuf> {
            self.frames.insert(name.to_string(), frame.clone());
            self.order.push(name.to_string());
            Ok(PathBuf::from(name))
        }
    }

    #[test]
    fn names_are_zero_padded() {
        assert_eq!(
            output_file_name("stereoscopic", "sidebyside", 0, "jpg"),
            "stereoscopic_sidebyside_000.jpg"
        );
        assert_eq!(
            output_file_name("stereoscopic", "bluered", 42, "png"),
            "stereoscopic_bluered_042.png"
        );
        assert_eq!(
            output_file_name("stereoscopic", "bluered", 1234, "jpg"),
            "stereoscopic_bluered_1234.jpg"
        );
    }

    #[test]
    fn scan_skips_existing_names() {
        let mut store = MemoryStore::default();
        let frame = Frame::from(sg_core::Image::new_fill(1, 1, 0u8));
        for i in 0..5 {
            let name = output_file_name("stereoscopic", "sidebyside", i, "jpg");
            store.save(&frame, &name).expect("memory save");
        }
        // Other labels do not occupy this label's sequence.
        store
            .save(&frame, "stereoscopic_bluered_005.jpg")
            .expect("memory save");

        assert_eq!(
            next_available_name(&store, "stereoscopic", "sidebyside", "jpg"),
            "stereoscopic_sidebyside_005.jpg"
        );
        assert_eq!(
            next_available_name(&store, "stereoscopic", "bluered", "jpg"),
            "stereoscopic_bluered_000.jpg"
        );
    }

    #[test]
    fn scan_fills_the_first_gap() {
        let mut store = MemoryStore::default();
        let frame = Frame::from(sg_core::Image::new_fill(1, 1, 0u8));
        store
            .save(&frame, "stereoscopic_sidebyside_001.jpg")
            .expect("memory save");
        assert_eq!(
            next_available_name(&store, "stereoscopic", "sidebyside", "jpg"),
            "stereoscopic_sidebyside_000.jpg"
        );
    }

    #[test]
    fn unusable_output_dir_is_a_save_error() {
        let blocker = std::env::temp_dir().join(format!(
            "stereogram-store-blocker-{}",
            std::process::id()
        ));
        std::fs::write(&blocker, b"not a directory").expect("write blocker file");
        let dir = blocker.join("out");

        let mut store = FsStore::new(&dir);
        let frame = Frame::from(sg_core::Image::new_fill(1, 1, 0u8));
        let err = store
            .save(&frame, "stereoscopic_sidebyside_000.png")
            .expect_err("a file sits where the directory should be");
        let _ = std::fs::remove_file(&blocker);

        match err {
            StereoError::ImageSave { path, .. } => assert_eq!(path, dir),
            other => panic!("expected ImageSave, got {other:?}"),
        }
    }
}
