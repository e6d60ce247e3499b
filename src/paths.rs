//! Path derivations used by the launcher.
//!
//! The derivations work on the encoded bytes of an [`OsStr`] with the separators of
//! a [`Platform`], so paths that are not valid Unicode are handled and the result
//! does not depend on the OS the code happens to run on. Only [`is_regular_file`]
//! and [`find_command_path`] touch the filesystem.

use crate::config::LauncherConfig;
use crate::platform::Platform;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory containing `self_path`: everything before the last directory
/// separator, or `.` when there is none.
pub fn exe_directory<'a>(self_path: &'a OsStr, platform: &impl Platform) -> &'a OsStr {
    match rfind(self_path, platform.dir_separator()) {
        Some(idx) => prefix(self_path, idx),
        None => OsStr::new("."),
    }
}

/// `<dir><sep><interpreter><exe-suffix>`.
pub fn interpreter_path(dir: &OsStr, config: &LauncherConfig, platform: &impl Platform) -> OsString {
    let mut path = join(dir, &config.interpreter, platform);
    path.push(platform.exe_suffix());
    path
}

/// `self_path` with the extension of its file name replaced by the script extension.
///
/// A file name without a dot gets the extension appended. Dots in directory
/// components are never treated as an extension.
pub fn script_path(self_path: &OsStr, config: &LauncherConfig, platform: &impl Platform) -> OsString {
    let name_start = rfind(self_path, platform.dir_separator()).map_or(0, |idx| idx + 1);
    let bytes = self_path.as_encoded_bytes();
    let stem_end = bytes[name_start..]
        .iter()
        .rposition(|&b| b == b'.')
        .map_or(bytes.len(), |idx| name_start + idx);

    let mut script = prefix(self_path, stem_end).to_os_string();
    script.push(&config.script_extension);
    script
}

/// `<dir><sep><library-dir>`, the entry added to the library search variable.
pub fn library_dir(dir: &OsStr, config: &LauncherConfig, platform: &impl Platform) -> OsString {
    join(dir, &config.library_dir, platform)
}

fn join(dir: &OsStr, name: &str, platform: &impl Platform) -> OsString {
    let mut path = dir.to_os_string();
    path.push(platform.dir_separator().to_string());
    path.push(name);
    path
}

// Separators are ASCII, so byte positions found here are valid split points.
fn rfind(s: &OsStr, separator: char) -> Option<usize> {
    debug_assert!(separator.is_ascii());
    s.as_encoded_bytes()
        .iter()
        .rposition(|&b| b == separator as u8)
}

fn prefix(s: &OsStr, end: usize) -> &OsStr {
    // SAFETY: `end` is either the length of `s` or the index of an ASCII byte, both
    // of which split the encoded bytes on a boundary.
    unsafe { OsStr::from_encoded_bytes_unchecked(&s.as_encoded_bytes()[..end]) }
}

/// True when `path` names an existing regular file. Symbolic links are followed.
pub fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Resolve a command the way a shell would, searching `search_paths` (a `PATH`
/// value) when `cmd` is a bare name.
///
/// Behavior:
/// - Absolute path or a relative path with several components: returned if it is a
///   regular file.
/// - Single component: each directory of `search_paths` is tried in order and the
///   first regular file is returned.
/// - Empty path: `None`.
pub fn find_command_path(search_paths: &OsStr, cmd: &Path) -> Option<PathBuf> {
    let mut components = cmd.components();
    match (components.next(), components.next()) {
        // Empty path -> not found
        (None, _) => None,
        (Some(name), None) if !cmd.is_absolute() => find_in_path(search_paths, name.as_os_str()),
        _ => find_by_path(cmd).map(Path::to_path_buf),
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    for dir in std::env::split_paths(search_paths) {
        let path = dir.join(cmd);
        if let Some(path) = find_by_path(&path) {
            return Some(path.to_owned());
        }
    }
    None
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if is_regular_file(path) { Some(path) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Posix, Windows};
    use std::fs::File;

    fn config() -> LauncherConfig {
        LauncherConfig::default()
    }

    #[test]
    fn directory_is_prefix_before_last_separator() {
        assert_eq!(exe_directory(OsStr::new("/opt/app/bin/hw"), &Posix), "/opt/app/bin");
        assert_eq!(exe_directory(OsStr::new("rel/hw"), &Posix), "rel");
        assert_eq!(exe_directory(OsStr::new(r"C:\dist\hw.exe"), &Windows), r"C:\dist");
    }

    #[test]
    fn directory_defaults_to_current() {
        assert_eq!(exe_directory(OsStr::new("hw"), &Posix), ".");
        assert_eq!(exe_directory(OsStr::new("hw.exe"), &Windows), ".");
        // A forward slash is not a separator under Windows conventions here.
        assert_eq!(exe_directory(OsStr::new("dist/hw.exe"), &Windows), ".");
    }

    #[test]
    fn directory_of_root_entry_is_empty() {
        assert_eq!(exe_directory(OsStr::new("/hw"), &Posix), "");
        assert_eq!(interpreter_path(OsStr::new(""), &config(), &Posix), "/python");
    }

    #[test]
    fn interpreter_path_uses_platform_suffix() {
        assert_eq!(interpreter_path(OsStr::new("/opt/app"), &config(), &Posix), "/opt/app/python");
        assert_eq!(
            interpreter_path(OsStr::new(r"C:\dist"), &config(), &Windows),
            r"C:\dist\python.exe"
        );
    }

    #[test]
    fn script_path_replaces_extension() {
        assert_eq!(script_path(OsStr::new("/x/foo.bin"), &config(), &Posix), "/x/foo.py");
        assert_eq!(script_path(OsStr::new(r"C:\dist\hw.exe"), &config(), &Windows), r"C:\dist\hw.py");
        assert_eq!(script_path(OsStr::new("foo.tar.gz"), &config(), &Posix), "foo.tar.py");
    }

    #[test]
    fn script_path_appends_missing_extension() {
        assert_eq!(script_path(OsStr::new("/x/foo"), &config(), &Posix), "/x/foo.py");
        assert_eq!(script_path(OsStr::new("foo"), &config(), &Posix), "foo.py");
    }

    #[test]
    fn script_path_ignores_dots_in_directories() {
        assert_eq!(script_path(OsStr::new("/opt/app.d/run"), &config(), &Posix), "/opt/app.d/run.py");
        assert_eq!(
            script_path(OsStr::new(r"C:\my.app\hw"), &config(), &Windows),
            r"C:\my.app\hw.py"
        );
    }

    #[test]
    #[cfg(unix)]
    fn non_unicode_paths_are_derived_bytewise() {
        use std::os::unix::ffi::OsStrExt;
        let self_path = OsStr::from_bytes(b"/opt/\xffapp/h\xfew.bin");

        assert_eq!(exe_directory(self_path, &Posix).as_bytes(), b"/opt/\xffapp");
        assert_eq!(
            script_path(self_path, &config(), &Posix).as_bytes(),
            b"/opt/\xffapp/h\xfew.py"
        );
        assert_eq!(
            interpreter_path(exe_directory(self_path, &Posix), &config(), &Posix).as_bytes(),
            b"/opt/\xffapp/python"
        );
    }

    #[test]
    fn library_dir_joins_with_separator() {
        assert_eq!(library_dir(OsStr::new("/opt/app"), &config(), &Posix), "/opt/app/pylib");
        assert_eq!(library_dir(OsStr::new(r"C:\dist"), &config(), &Windows), r"C:\dist\pylib");
    }

    #[test]
    fn regular_file_check() {
        let base = std::env::temp_dir().join(format!("paths_tests_{}_file", std::process::id()));
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(base.join("dir")).expect("create temp dir");
        let file = base.join("file");
        File::create(&file).expect("touch file");

        assert!(is_regular_file(&file));
        assert!(!is_regular_file(&base.join("dir")));
        assert!(!is_regular_file(&base.join("absent")));

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    #[cfg(unix)]
    fn regular_file_check_follows_symlinks() {
        let base = std::env::temp_dir().join(format!("paths_tests_{}_link", std::process::id()));
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(&base).expect("create temp dir");
        File::create(base.join("target")).expect("touch target");
        std::os::unix::fs::symlink(base.join("target"), base.join("good")).expect("symlink");
        std::os::unix::fs::symlink(base.join("missing"), base.join("dangling")).expect("symlink");

        assert!(is_regular_file(&base.join("good")));
        assert!(!is_regular_file(&base.join("dangling")));

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn single_component_found_in_search_path() {
        let base = std::env::temp_dir().join(format!("paths_tests_{}_search", std::process::id()));
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(base.join("a")).expect("create a");
        fs::create_dir_all(base.join("b")).expect("create b");
        File::create(base.join("b").join("tool")).expect("touch tool");

        let search = std::env::join_paths([base.join("a"), base.join("b")]).expect("join");
        let found = find_command_path(&search, Path::new("tool"));
        assert_eq!(found, Some(base.join("b").join("tool")));
        assert_eq!(find_command_path(&search, Path::new("nonexisting")), None);

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn absolute_path_is_checked_directly() {
        let base = std::env::temp_dir().join(format!("paths_tests_{}_abs", std::process::id()));
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(&base).expect("create temp dir");
        let file = base.join("tool");
        File::create(&file).expect("touch tool");

        assert_eq!(find_command_path(OsStr::new(""), &file), Some(file.clone()));
        assert_eq!(find_command_path(OsStr::new(""), &base.join("nope")), None);

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn empty_path_is_none() {
        assert_eq!(find_command_path(OsStr::new("/bin"), Path::new("")), None);
    }
}
