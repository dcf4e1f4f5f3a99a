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

use std::fs::write;

use studypack_core::error::Fallible;
use studypack_core::error::fail;
use studypack_core::export::PageLayout;
use studypack_core::export::export_file_name;
use studypack_core::export::render_export;
use studypack_core::pack::ContentKind;
use studypack_core::pack::StudyPack;

use crate::collection::Collection;

pub fn export_pack(
    directory: Option<String>,
    kind: ContentKind,
    output: Option<String>,
) -> Fallible<()> {
    let Collection { pack, .. } = Collection::new(directory)?;
    let document = export_document(&pack, kind)?;
    let path = output.unwrap_or_else(|| export_file_name(&pack.topic, kind.title()));
    write(&path, document)?;
    log::info!("Wrote {kind} export to {path}");
    Ok(())
}

/// The export text for one of the pack's texts.
pub fn export_document(pack: &StudyPack, kind: ContentKind) -> Fallible<String> {
    match pack.text(kind) {
        Some(text) => Ok(render_export(
            kind.title(),
            &pack.topic,
            text,
            PageLayout::default(),
        )),
        None => fail(format!("{kind} cannot be exported.")),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;
    use std::path::PathBuf;

    use super::*;
    use crate::helper::SAMPLE_QUIZ;
    use crate::helper::create_tmp_pack;

    #[test]
    fn test_export_to_file() -> Fallible<()> {
        let directory = create_tmp_pack(SAMPLE_QUIZ)?;
        let output = PathBuf::from(&directory).join("out.txt");
        export_pack(
            Some(directory),
            ContentKind::Notes,
            Some(output.display().to_string()),
        )?;
        let text = read_to_string(output)?;
        assert!(text.starts_with("Notes\nPhotosynthesis\n\n"));
        assert!(text.contains("Chlorophyll absorbs light"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
        Ok(())
    }

    #[test]
    fn test_quiz_cannot_be_exported() -> Fallible<()> {
        let Collection { pack, .. } = Collection::new(Some(create_tmp_pack(SAMPLE_QUIZ)?))?;
        assert_eq!(
            export_document(&pack, ContentKind::Quiz),
            Err(studypack_core::ErrorReport::new("quiz cannot be exported."))
        );
        Ok(())
    }
}
