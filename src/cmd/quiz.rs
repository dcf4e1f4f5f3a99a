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

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use studypack_core::error::Fallible;
use studypack_core::rng::RandomSource;
use studypack_core::session::OptionFeedback;
use studypack_core::session::QuizEngine;
use studypack_core::session::QuizSnapshot;

use crate::collection::Collection;
use crate::utils::session_rng;

pub fn run_quiz(directory: Option<String>, seed: Option<u64>) -> Fallible<()> {
    let Collection { pack, .. } = Collection::new(directory)?;
    let mut engine = QuizEngine::new(pack.questions, session_rng(seed));
    drive(&pack.topic, &mut engine, stdin().lock(), stdout().lock())
}

/// Run the quiz loop until the input ends or the user quits.
pub fn drive<R: RandomSource>(
    topic: &str,
    engine: &mut QuizEngine<R>,
    input: impl BufRead,
    mut output: impl Write,
) -> Fallible<()> {
    let mut lines = input.lines();
    loop {
        let snapshot = engine.snapshot();
        write_snapshot(&mut output, topic, &snapshot)?;
        if snapshot == QuizSnapshot::NoQuestions {
            return Ok(());
        }
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let line = line.trim();
        if line == "q" {
            return Ok(());
        }
        match snapshot {
            QuizSnapshot::InProgress {
                answered: false,
                ref options,
                ..
            } => match line.parse::<usize>() {
                _ if options.is_empty() => engine.answer(0),
                Ok(n) if (1..=options.len()).contains(&n) => engine.answer(n - 1),
                _ => writeln!(output, "Pick an option between 1 and {}.", options.len())?,
            },
            QuizSnapshot::InProgress { answered: true, .. } => engine.advance(),
            QuizSnapshot::Completed { .. } if line == "r" => engine.restart(),
            _ => writeln!(output, "Type 'r' to try again or 'q' to quit.")?,
        }
    }
}

fn write_snapshot(output: &mut impl Write, topic: &str, snapshot: &QuizSnapshot) -> Fallible<()> {
    match snapshot {
        QuizSnapshot::NoQuestions => {
            writeln!(output, "No quiz questions are available for '{topic}'.")?;
        }
        QuizSnapshot::InProgress {
            current_index,
            total,
            prompt,
            options,
            feedback,
            answered,
            is_last,
            ..
        } => {
            writeln!(output)?;
            writeln!(output, "Question {} / {total}", current_index + 1)?;
            writeln!(output, "{prompt}")?;
            for (i, (option, feedback)) in options.iter().zip(feedback).enumerate() {
                let mark = match feedback {
                    OptionFeedback::Correct => " ✔",
                    OptionFeedback::Incorrect => " ✘",
                    OptionFeedback::Neutral | OptionFeedback::Dimmed => "",
                };
                writeln!(output, "  {}) {option}{mark}", i + 1)?;
            }
            if options.is_empty() && !*answered {
                writeln!(output, "This question has no options. [enter] Skip")?;
            }
            if *answered {
                let next = if *is_last { "See results" } else { "Next question" };
                writeln!(output, "[enter] {next}")?;
            }
        }
        QuizSnapshot::Completed {
            score,
            total,
            percentage,
        } => {
            writeln!(output)?;
            writeln!(output, "Quiz Complete: {percentage}%")?;
            writeln!(
                output,
                "You scored {score} out of {total} questions correctly"
            )?;
            writeln!(output, "[r] Try again (shuffled)  [q] Quit")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use studypack_core::quiz::QuizQuestion;
    use studypack_core::rng::TinyRng;

    use super::*;

    fn run(questions: Vec<QuizQuestion>, input: &str) -> Fallible<String> {
        let mut engine = QuizEngine::new(questions, TinyRng::from_seed(1));
        let mut output = Vec::new();
        drive("Arithmetic", &mut engine, input.as_bytes(), &mut output)?;
        Ok(String::from_utf8(output)?)
    }

    fn single() -> Vec<QuizQuestion> {
        vec![QuizQuestion::new("2 + 2?", vec!["3".into(), "4".into()], 1)]
    }

    #[test]
    fn test_no_questions() -> Fallible<()> {
        let output = run(Vec::new(), "")?;
        assert_eq!(output, "No quiz questions are available for 'Arithmetic'.\n");
        Ok(())
    }

    #[test]
    fn test_correct_answer() -> Fallible<()> {
        let output = run(single(), "2\n\nq\n")?;
        assert!(output.contains("Question 1 / 1"));
        assert!(output.contains("2) 4 ✔"));
        assert!(output.contains("[enter] See results"));
        assert!(output.contains("Quiz Complete: 100%"));
        assert!(output.contains("You scored 1 out of 1 questions correctly"));
        Ok(())
    }

    #[test]
    fn test_wrong_answer() -> Fallible<()> {
        let output = run(single(), "1\n\n")?;
        assert!(output.contains("1) 3 ✘"));
        assert!(output.contains("Quiz Complete: 0%"));
        Ok(())
    }

    #[test]
    fn test_invalid_input() -> Fallible<()> {
        let output = run(single(), "7\nfoo\nq\n")?;
        assert_eq!(output.matches("Pick an option between 1 and 2.").count(), 2);
        Ok(())
    }

    #[test]
    fn test_question_without_options() -> Fallible<()> {
        let questions = vec![QuizQuestion::new("Anything?", Vec::new(), 0)];
        let output = run(questions, "\n\n")?;
        assert!(output.contains("This question has no options. [enter] Skip"));
        assert!(output.contains("Quiz Complete: 0%"));
        assert!(!output.contains("Pick an option"));
        Ok(())
    }

    #[test]
    fn test_restart() -> Fallible<()> {
        let output = run(single(), "2\n\nr\n1\n\nq\n")?;
        assert!(output.contains("Quiz Complete: 100%"));
        assert!(output.contains("Quiz Complete: 0%"));
        Ok(())
    }
}
