//! Bucket listing.
//!
//! [`BucketLister`] is the narrow capability the monitor loop needs: write
//! the bucket's object listing to a file and report how many lines it has.
//! [`CommandLister`] shells out to a CLI such as `b2 ls --recursive`.

use crate::error::ListError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};

/// Produces a listing snapshot for a bucket.
pub trait BucketLister {
    /// Write the listing of `bucket` to `output`, returning the line count.
    fn list(&mut self, bucket: &str, output: &Path) -> Result<usize, ListError>;
}

/// Runs an external listing command with stdout redirected into the
/// snapshot file. Only the exit status decides success.
#[derive(Debug, Clone)]
pub struct CommandLister {
    command: Vec<String>,
}

impl CommandLister {
    /// `command` is the program followed by its arguments. `{bucket}` in any
    /// argument is replaced by the bucket name at call time.
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl BucketLister for CommandLister {
    fn list(&mut self, bucket: &str, output: &Path) -> Result<usize, ListError> {
        let (program, args) = self.command.split_first().ok_or(ListError::EmptyCommand)?;
        let args: Vec<String> = args.iter().map(|a| a.replace("{bucket}", bucket)).collect();

        let file = File::create(output).map_err(|e| ListError::io(output, e))?;

        tracing::debug!("Running {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(file))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ListError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ListError::ExitStatus {
                program: program.clone(),
                status: status.to_string(),
            });
        }

        let count = count_lines(output)?;
        tracing::info!("Retrieved {count} files from bucket");
        Ok(count)
    }
}

/// Number of lines in a file.
pub(crate) fn count_lines(path: &Path) -> Result<usize, ListError> {
    let file = File::open(path).map_err(|e| ListError::io(path, e))?;
    let mut count = 0;
    for line in BufReader::new(file).split(b'\n') {
        line.map_err(|e| ListError::io(path, e))?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(script: &str) -> CommandLister {
        CommandLister::new(vec!["sh".to_string(), "-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_count_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listing.txt");
        std::fs::write(&path, "a\nb\nc\n").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 3);

        std::fs::write(&path, "").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 0);
    }

    #[test]
    fn test_empty_command() {
        let dir = TempDir::new().unwrap();
        let mut lister = CommandLister::new(vec![]);
        let result = lister.list("bucket", &dir.path().join("out.txt"));
        assert!(matches!(result, Err(ListError::EmptyCommand)));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_output_is_captured() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.txt");
        let mut lister = sh("printf 'a.txt\\nb.txt\\n'");

        assert_eq!(lister.list("bucket", &output).unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "a.txt\nb.txt\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_bucket_placeholder_is_substituted() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.txt");
        let mut lister = CommandLister::new(vec![
            "echo".to_string(),
            "b2://{bucket}/x".to_string(),
        ]);

        lister.list("photos", &output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "b2://photos/x\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_failure() {
        let dir = TempDir::new().unwrap();
        let mut lister = sh("exit 3");
        let result = lister.list("bucket", &dir.path().join("out.txt"));
        assert!(matches!(result, Err(ListError::ExitStatus { .. })));
    }

    #[test]
    fn test_missing_program_is_failure() {
        let dir = TempDir::new().unwrap();
        let mut lister = CommandLister::new(vec!["definitely-not-a-real-program-xyz".to_string()]);
        let result = lister.list("bucket", &dir.path().join("out.txt"));
        assert!(matches!(result, Err(ListError::Spawn { .. })));
    }
}
