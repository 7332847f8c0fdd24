//! File-backed session slot scoped to a single directory.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::ambient_authority;
use cap_std::fs::Dir;

use super::{decode, encode};
use crate::domain::User;
use crate::domain::ports::{SESSION_SLOT_KEY, SessionSlot, SessionSlotError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Session slot persisted as `<dir>/user.json`.
///
/// All file access goes through a capability handle on the configured
/// directory. Writes land in a temporary sibling first and are renamed into
/// place so a crash never leaves a half-written identity.
#[derive(Debug)]
pub struct JsonFileSessionSlot {
    dir: Dir,
    path: PathBuf,
    file_name: String,
}

impl JsonFileSessionSlot {
    /// Open (creating if needed) the session directory.
    ///
    /// # Errors
    ///
    /// Returns [`SessionSlotError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionSlotError> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|err| io_error(path, &err))?;
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| io_error(path, &err))?;

        Ok(Self {
            dir,
            path: path.to_path_buf(),
            file_name: format!("{SESSION_SLOT_KEY}.json"),
        })
    }

    /// Directory holding the slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_name(&self) -> String {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!(".{}.tmp.{}.{counter}", self.file_name, std::process::id())
    }
}

fn io_error(path: &Path, err: &io::Error) -> SessionSlotError {
    SessionSlotError::io(format!("{}: {err}", path.display()))
}

impl SessionSlot for JsonFileSessionSlot {
    fn save(&self, user: &User) -> Result<(), SessionSlotError> {
        let payload = encode(user)?;
        let temp_name = self.temp_name();

        self.dir
            .write(&temp_name, payload.as_bytes())
            .map_err(|err| io_error(&self.path, &err))?;
        if let Err(err) = self.dir.rename(&temp_name, &self.dir, &self.file_name) {
            drop(self.dir.remove_file(&temp_name));
            return Err(io_error(&self.path, &err));
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<User>, SessionSlotError> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(raw) => decode(&raw).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&self.path, &err)),
        }
    }

    fn clear(&self) -> Result<(), SessionSlotError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&self.path, &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, EmailAddress, UserId, UserRole};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn user() -> User {
        User::new(
            UserId::random(),
            DisplayName::new("Grace Hopper").expect("name"),
            EmailAddress::new("grace@example.com").expect("email"),
            UserRole::Client,
        )
    }

    #[fixture]
    fn scratch() -> TempDir {
        TempDir::new().expect("temp dir")
    }

    #[rstest]
    fn persists_across_handles(user: User, scratch: TempDir) {
        let session_dir = scratch.path().join("nested").join("session");
        let slot = JsonFileSessionSlot::open(&session_dir).expect("open slot");
        slot.save(&user).expect("save");

        let reopened = JsonFileSessionSlot::open(&session_dir).expect("reopen slot");
        assert_eq!(reopened.load(), Ok(Some(user)));
        assert!(session_dir.join("user.json").exists());
    }

    #[rstest]
    fn clear_removes_the_file_and_tolerates_absence(user: User, scratch: TempDir) {
        let slot = JsonFileSessionSlot::open(scratch.path()).expect("open slot");
        slot.save(&user).expect("save");

        slot.clear().expect("clear");
        assert_eq!(slot.load(), Ok(None));
        slot.clear().expect("second clear");
    }

    #[rstest]
    fn garbage_on_disk_is_reported_corrupt(scratch: TempDir) {
        std::fs::write(scratch.path().join("user.json"), "[]").expect("write garbage");
        let slot = JsonFileSessionSlot::open(scratch.path()).expect("open slot");

        assert!(matches!(slot.load(), Err(SessionSlotError::Corrupt { .. })));
    }
}
