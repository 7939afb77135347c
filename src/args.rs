use std::error::Error;

use crate::error::JournalError;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Next positional argument, which must be present
    pub fn require(&mut self, what: &str) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide {} for {}", what, self.command_name).into()
        })
    }

    /// Check if there are remaining arguments
    pub fn has_more(&self) -> bool {
        self.iter.len() > 0
    }

    /// Get next positional argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    /// Collect remaining args
    pub fn collect_remaining(self) -> Vec<String> {
        self.iter.collect()
    }

    /// Fail on anything left over
    pub fn finish(mut self) -> Result<(), Box<dyn Error>> {
        match self.iter.next() {
            Some(extra) => Err(format!(
                "Unexpected argument for {}: {}",
                self.command_name, extra
            )
            .into()),
            None => Ok(()),
        }
    }
}

/// Flags accepted by `view`
#[derive(Default, Debug)]
pub struct ViewFlags {
    pub render: bool,
    pub plain: bool,
    pub id: Option<String>,
}

impl ViewFlags {
    pub fn parse(args: Vec<String>) -> Result<Self, Box<dyn Error>> {
        let mut flags = Self::default();
        for arg in args {
            match arg.as_str() {
                "--render" | "-r" => flags.render = true,
                "--plain" => flags.plain = true,
                other if other.starts_with('-') => {
                    return Err(format!("Unknown flag for view: {other}").into());
                }
                other => {
                    if flags.id.is_some() {
                        return Err(format!(
                            "Unexpected argument for view: {other}"
                        )
                        .into());
                    }
                    flags.id = Some(other.to_string());
                }
            }
        }
        Ok(flags)
    }
}

/// Parse a positive count such as the `list` limit
pub fn parse_count(raw: &str) -> Result<usize, Box<dyn Error>> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Expected a positive number, got '{raw}'").into()),
    }
}

/// Resolve several 1-based ids at once, reporting every bad one together
pub fn parse_ids(
    raw: &[String],
    max: usize,
) -> Result<Vec<usize>, JournalError> {
    let mut ids = Vec::new();
    let mut invalid = Vec::new();
    for r in raw {
        match r.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => ids.push(n),
            _ => invalid.push(r.clone()),
        }
    }
    if invalid.is_empty() {
        Ok(ids)
    } else {
        Err(JournalError::InvalidIds { ids: invalid.join(", "), max })
    }
}
