use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// A presentation file held in memory, as picked by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, naming it after the last path component.
    pub fn read<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Ok(Self::new(display_name(path), bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// File name used for display and extension filtering.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// Byte payloads can be tens of megabytes; keep them out of debug output.
impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}
