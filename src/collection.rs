// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use studypack_core::StudyPack;
use studypack_core::error::ErrorReport;
use studypack_core::error::Fallible;
use studypack_core::error::fail;
use studypack_core::pack::ContentKind;
use studypack_core::pack::PackManifest;

const MANIFEST_FILE: &str = "pack.toml";

/// A study pack loaded from a directory.
pub struct Collection {
    pub directory: PathBuf,
    pub pack: StudyPack,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;

        let manifest = read_manifest(&directory)?;
        let topic = manifest.topic.unwrap_or_else(|| {
            directory
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("untitled")
                .to_string()
        });
        log::debug!("Loading study pack '{topic}' from {}", directory.display());

        let read = |kind: ContentKind| -> Fallible<String> {
            let path = directory.join(kind.file_name());
            read_to_string(&path).map_err(|e| {
                ErrorReport::new(format!("failed to read {}: {e}", path.display()))
            })
        };
        let pack = StudyPack::assemble(
            topic,
            read(ContentKind::Notes),
            read(ContentKind::Explanation),
            read(ContentKind::Examples),
            read(ContentKind::Quiz),
        )?;
        Ok(Self { directory, pack })
    }
}

fn read_manifest(directory: &Path) -> Fallible<PackManifest> {
    let path = directory.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(PackManifest::default());
    }
    PackManifest::parse(&read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use std::fs::remove_file;
    use std::fs::write;

    use super::*;
    use crate::helper::SAMPLE_QUIZ;
    use crate::helper::create_tmp_pack;

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
    }

    #[test]
    fn test_load_pack() -> Fallible<()> {
        let directory = create_tmp_pack(SAMPLE_QUIZ)?;
        let collection = Collection::new(Some(directory))?;
        assert_eq!(collection.pack.topic, "Photosynthesis");
        assert_eq!(collection.pack.questions.len(), 2);
        Ok(())
    }

    #[test]
    fn test_topic_defaults_to_directory_name() -> Fallible<()> {
        let directory = create_tmp_pack(SAMPLE_QUIZ)?;
        remove_file(PathBuf::from(&directory).join(MANIFEST_FILE))?;
        let collection = Collection::new(Some(directory.clone()))?;
        let expected = PathBuf::from(directory)
            .canonicalize()?
            .file_name()
            .and_then(|n| n.to_str().map(str::to_string));
        assert_eq!(Some(collection.pack.topic), expected);
        Ok(())
    }

    #[test]
    fn test_missing_content_fails_the_pack() -> Fallible<()> {
        let directory = create_tmp_pack(SAMPLE_QUIZ)?;
        remove_file(PathBuf::from(&directory).join("examples.md"))?;
        let result = Collection::new(Some(directory));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: Failed to generate content for 'Photosynthesis'.".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_malformed_quiz_loads_without_questions() -> Fallible<()> {
        let directory = create_tmp_pack("not json at all")?;
        let collection = Collection::new(Some(directory))?;
        assert!(collection.pack.questions.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_manifest() -> Fallible<()> {
        let directory = create_tmp_pack(SAMPLE_QUIZ)?;
        write(PathBuf::from(&directory).join(MANIFEST_FILE), "topic = [")?;
        assert!(Collection::new(Some(directory)).is_err());
        Ok(())
    }
}
