use std::path::{Path, PathBuf};

use itertools::Itertools;
use walkdir::WalkDir;

/// Name of the message file written by shared memory runs
const SMP_MESSAGE_FILE: &str = "messag";
/// Prefix of the per-process message files written by distributed runs, e.g. `mes0003`
const MPP_MESSAGE_PREFIX: &str = "mes";

/// Whether the file name is one the solver uses for message files
pub fn is_message_file_name(name: &str) -> bool {
    if name == SMP_MESSAGE_FILE {
        return true;
    }

    name.strip_prefix(MPP_MESSAGE_PREFIX)
        .is_some_and(|rank| rank.len() == 4 && rank.bytes().all(|b| b.is_ascii_digit()))
}

/// Expand the inputs into a sorted list of message files.
///
/// Files are taken as they are, whatever their name. Directories are searched recursively for
/// files named like message files, following symbolic links. Entries that cannot be read,
/// including link loops, are logged and skipped.
pub fn discover_message_files<I, P>(inputs: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    inputs
        .into_iter()
        .flat_map(|input| {
            let input = input.as_ref();
            if input.is_dir() {
                find_in_dir(input)
            } else {
                vec![input.to_path_buf()]
            }
        })
        .sorted()
        .dedup()
        .collect()
}

fn find_in_dir(dir: &Path) -> Vec<PathBuf> {
    let files = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {e}", dir.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_str().is_some_and(is_message_file_name))
        .map(|entry| entry.into_path())
        .collect::<Vec<_>>();

    debug!("Found {} message files in {}", files.len(), dir.display());
    files
}
