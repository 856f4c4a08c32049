/*
Step Patterns
=============

A pattern is one bar of a single channel written as text, one character per
step:

    X   hit on this step (lowercase x also accepted)
    .   rest

    kick   X...X...X..X.X..
    snare  ..X...X...X...X.
    hihat  X.X.X.X.X.X.X.XX

With 4 beats of 4 subdivisions each pattern is 16 characters, and every
channel of a sequencer must have exactly that many. Anything else is a
configuration mistake and is rejected when the session is built, never while
audio is running.
*/

use std::fmt;

use crate::error::{Error, Result};

const MARK: char = 'X';
const REST: char = '.';

/// One bar of on/off steps for a single sequencer channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPattern {
    steps: Vec<bool>,
}

impl StepPattern {
    /// Parse `text`, requiring exactly `expected_len` steps.
    pub fn parse(text: &str, expected_len: usize) -> Result<Self> {
        let steps = text
            .chars()
            .enumerate()
            .map(|(position, c)| match c {
                'X' | 'x' => Ok(true),
                REST => Ok(false),
                found => Err(Error::UnrecognizedStep {
                    pattern: text.to_owned(),
                    position,
                    found,
                }),
            })
            .collect::<Result<Vec<bool>>>()?;

        if steps.len() != expected_len {
            return Err(Error::PatternLength {
                pattern: text.to_owned(),
                expected: expected_len,
                found: steps.len(),
            });
        }

        Ok(Self { steps })
    }

    /// Pattern from explicit step flags.
    pub fn from_steps(steps: Vec<bool>) -> Self {
        Self { steps }
    }

    /// True if `step` is marked. Out-of-range steps are rests.
    pub fn is_marked(&self, step: usize) -> bool {
        self.steps.get(step).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[bool] {
        &self.steps
    }
}

impl fmt::Display for StepPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &marked in &self.steps {
            write!(f, "{}", if marked { MARK } else { REST })?;
        }
        Ok(())
    }
}
