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

use std::error::Error;
use std::fs::write;
use std::path::PathBuf;

use studypack_core::error::Fallible;
use tempfile::tempdir;

/// Result type for tests that mix core errors with client errors.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

pub const SAMPLE_NOTES: &str = "## Photosynthesis\nKey terms:\n- **Chlorophyll** absorbs light\n- Glucose is produced\n### Light reactions\nThey happen in the thylakoids.";

pub const SAMPLE_QUIZ: &str = r#"```json
[
  {"question": "What pigment absorbs light?", "options": ["Chlorophyll", "Keratin", "Melanin", "Hemoglobin"], "answer": 0},
  {"question": "What sugar is produced?", "options": ["Lactose", "Glucose", "Sucrose", "Maltose"], "answer": 1}
]
```"#;

/// Create a temporary pack directory holding all four contents and a
/// manifest, and return its path.
pub fn create_tmp_pack(quiz: &str) -> Fallible<String> {
    let dir: PathBuf = tempdir()?.keep();
    write(dir.join("pack.toml"), "topic = \"Photosynthesis\"\n")?;
    write(dir.join("notes.md"), SAMPLE_NOTES)?;
    write(
        dir.join("explanation.md"),
        "Plants turn *light* into `chemical energy`.",
    )?;
    write(dir.join("examples.md"), "1. A leaf in sunlight\n2. Algae in a pond")?;
    write(dir.join("quiz.json"), quiz)?;
    Ok(dir.canonicalize()?.display().to_string())
}
