//! File intake: the ordered list of presentation files picked by the user.

use tracing::debug;

use crate::models::UploadedFile;

/// File name suffixes accepted as presentations. Matching is case-sensitive.
pub const PRESENTATION_EXTENSIONS: [&str; 2] = [".pptx", ".ppt"];

/// Whether a file name carries a recognized presentation extension.
pub fn is_presentation(name: &str) -> bool {
    PRESENTATION_EXTENSIONS
        .iter()
        .any(|extension| name.ends_with(extension))
}

/// Ordered, non-deduplicated list of accepted files.
#[derive(Debug, Default, Clone)]
pub struct FileIntake {
    files: Vec<UploadedFile>,
}

impl FileIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every presentation file in arrival order, silently dropping
    /// the rest. Returns how many files were accepted.
    pub fn add<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = UploadedFile>,
    {
        let before = self.files.len();
        for file in files {
            if is_presentation(&file.name) {
                self.files.push(file);
            } else {
                debug!(name = %file.name, "ignoring non-presentation file");
            }
        }
        self.files.len() - before
    }

    /// Remove the file at `index`. Stale indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<UploadedFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    /// The file whose bytes are sent to the generative service.
    pub fn first(&self) -> Option<&UploadedFile> {
        self.files.first()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> UploadedFile {
        UploadedFile::new(name, vec![1, 2, 3])
    }

    #[test]
    fn accepts_presentations_and_drops_other_files() {
        let mut intake = FileIntake::new();
        let accepted = intake.add([file("lecture.pptx"), file("notes.docx")]);

        assert_eq!(accepted, 1);
        assert_eq!(intake.len(), 1);
        assert_eq!(intake.files()[0].name, "lecture.pptx");
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let mut intake = FileIntake::new();
        intake.add([file("LECTURE.PPTX"), file("old.ppt")]);

        assert_eq!(intake.len(), 1);
        assert_eq!(intake.files()[0].name, "old.ppt");
    }

    #[test]
    fn keeps_arrival_order_without_deduplication() {
        let mut intake = FileIntake::new();
        intake.add([file("b.pptx"), file("a.pptx")]);
        intake.add([file("b.pptx")]);

        let names: Vec<_> = intake.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b.pptx", "a.pptx", "b.pptx"]);
    }

    #[test]
    fn remove_with_stale_index_is_a_no_op() {
        let mut intake = FileIntake::new();
        intake.add([file("a.pptx"), file("b.pptx")]);

        assert!(intake.remove(5).is_none());
        assert_eq!(intake.len(), 2);

        let removed = intake.remove(0).unwrap();
        assert_eq!(removed.name, "a.pptx");
        assert_eq!(intake.first().unwrap().name, "b.pptx");
    }
}
