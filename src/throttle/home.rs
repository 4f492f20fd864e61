//! Home directory lookup

use crate::error::{AppError, Result};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where the home directory comes from
///
/// Tests substitute a fake to point the state file into a temporary
/// directory.
pub trait HomeDirProvider: Send + Sync {
    /// Home path from the environment (`HOME`), if set
    fn env_home(&self) -> Option<OsString>;

    /// Home path from the current user's account record
    fn account_home(&self) -> Result<PathBuf>;
}

/// Reads the real environment and account database
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHome;

impl HomeDirProvider for SystemHome {
    fn env_home(&self) -> Option<OsString> {
        std::env::var_os("HOME")
    }

    fn account_home(&self) -> Result<PathBuf> {
        account_home_dir()
    }
}

/// Resolve the home directory and check that it is an existing directory.
///
/// A non-empty environment value wins over the account record.
pub fn resolve_home_dir(provider: &dyn HomeDirProvider) -> Result<PathBuf> {
    let home = match provider.env_home().filter(|home| !home.is_empty()) {
        Some(home) => PathBuf::from(home),
        None => provider.account_home()?,
    };

    match fs::metadata(&home) {
        Ok(metadata) if metadata.is_dir() => Ok(home),
        Ok(_) => Err(not_a_directory(&home)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(not_a_directory(&home)),
        Err(e) => Err(AppError::home_dir(format!(
            "unable to inspect home directory {:?}: {}",
            home, e
        ))),
    }
}

fn not_a_directory(home: &Path) -> AppError {
    AppError::home_dir(format!("home directory {:?} must exist and be a directory", home))
}

#[cfg(unix)]
fn account_home_dir() -> Result<PathBuf> {
    use std::ffi::{CStr, OsStr};
    use std::os::unix::ffi::OsStrExt;

    let uid = unsafe { libc::getuid() };
    let mut buf_len = match unsafe { libc::sysconf(libc::_SC_GETPW_R_SIZE_MAX) } {
        n if n > 0 => n as usize,
        _ => 1024,
    };

    loop {
        let mut buf: Vec<libc::c_char> = vec![0; buf_len];
        let mut passwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();

        let rc = unsafe {
            libc::getpwuid_r(uid, &mut passwd, buf.as_mut_ptr(), buf.len(), &mut result)
        };

        if rc == libc::ERANGE && buf_len < (1 << 20) {
            buf_len *= 2;
            continue;
        }
        if rc != 0 {
            return Err(AppError::home_dir(format!(
                "unable to get information for current user: {}",
                std::io::Error::from_raw_os_error(rc)
            )));
        }
        if result.is_null() || passwd.pw_dir.is_null() {
            return Err(AppError::home_dir(format!(
                "no home directory recorded for uid {}",
                uid
            )));
        }

        // pw_dir points into `buf`, which is still alive here
        let dir = unsafe { CStr::from_ptr(passwd.pw_dir) };
        return Ok(PathBuf::from(OsStr::from_bytes(dir.to_bytes())));
    }
}

#[cfg(windows)]
fn account_home_dir() -> Result<PathBuf> {
    if let Some(value) = std::env::var_os("USERPROFILE") {
        return Ok(PathBuf::from(value));
    }
    match (std::env::var_os("HOMEDRIVE"), std::env::var_os("HOMEPATH")) {
        (Some(drive), Some(path)) => {
            let mut full = PathBuf::from(drive);
            full.push(path);
            Ok(full)
        }
        _ => Err(AppError::home_dir("unable to get information for current user")),
    }
}

#[cfg(not(any(unix, windows)))]
fn account_home_dir() -> Result<PathBuf> {
    Err(AppError::home_dir("no account database on this platform"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Provider with fixed answers
    pub(crate) struct FakeHome {
        pub env: Option<OsString>,
        pub account: Option<PathBuf>,
    }

    impl FakeHome {
        pub(crate) fn at(path: &std::path::Path) -> Self {
            Self { env: Some(path.as_os_str().to_owned()), account: None }
        }
    }

    impl HomeDirProvider for FakeHome {
        fn env_home(&self) -> Option<OsString> {
            self.env.clone()
        }

        fn account_home(&self) -> Result<PathBuf> {
            self.account
                .clone()
                .ok_or_else(|| AppError::home_dir("unable to get information for current user"))
        }
    }

    #[test]
    fn test_env_home_wins() {
        let env_dir = TempDir::new().unwrap();
        let account_dir = TempDir::new().unwrap();
        let provider = FakeHome {
            env: Some(env_dir.path().as_os_str().to_owned()),
            account: Some(account_dir.path().to_path_buf()),
        };

        assert_eq!(resolve_home_dir(&provider).unwrap(), env_dir.path());
    }

    #[test]
    fn test_falls_back_to_account_when_env_missing_or_empty() {
        let account_dir = TempDir::new().unwrap();

        for env in [None, Some(OsString::new())] {
            let provider = FakeHome { env, account: Some(account_dir.path().to_path_buf()) };
            assert_eq!(resolve_home_dir(&provider).unwrap(), account_dir.path());
        }
    }

    #[test]
    fn test_fails_without_any_source() {
        let provider = FakeHome { env: None, account: None };
        let error = resolve_home_dir(&provider).unwrap_err();
        assert!(matches!(error, AppError::HomeDir(_)));
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let error = resolve_home_dir(&FakeHome::at(&missing)).unwrap_err();
        assert!(error.to_string().contains("must exist and be a directory"));
    }

    #[test]
    fn test_regular_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let error = resolve_home_dir(&FakeHome::at(&file)).unwrap_err();
        assert!(matches!(error, AppError::HomeDir(_)));
        assert!(error.to_string().contains("must exist and be a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_account_lookup_returns_a_path() {
        // Containers may lack a passwd entry; only check shape when present.
        if let Ok(home) = account_home_dir() {
            assert!(!home.as_os_str().is_empty());
        }
    }
}
