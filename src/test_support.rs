use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Marker the fake toolchain writes into every artifact and the fake strip
/// removes.
#[cfg(unix)]
pub(crate) const DEBUG_MARKER: &str = "DEBUGINFO";

/// Stand-in for `cargo build`.
///
/// Records its arguments to `cargo.args` next to the script. The unit
/// `broken` fails like an unknown `--bin`, the unit `ghost` exits 0 without
/// producing anything, every other unit gets an executable at the standard
/// release path.
#[cfg(unix)]
const FAKE_CARGO: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$(dirname "$0")/cargo.args"
target=""; bin=""; dir=""
while [ $# -gt 0 ]; do
  case "$1" in
    --target) target="$2"; shift ;;
    --bin) bin="$2"; shift ;;
    --target-dir) dir="$2"; shift ;;
  esac
  shift
done
if [ "$bin" = "broken" ]; then
  echo "error: no bin target named \`broken\`" >&2
  exit 101
fi
if [ "$bin" = "ghost" ]; then
  exit 0
fi
mkdir -p "$dir/$target/release"
out="$dir/$target/release/$bin"
printf 'binary:%s:%s\nDEBUGINFO\n' "$bin" "$target" > "$out"
chmod 755 "$out"
"#;

/// Stand-in for `strip -o <out> <in>` that drops the debug marker line.
#[cfg(unix)]
const FAKE_STRIP: &str = r#"#!/bin/sh
[ "$1" = "-o" ] || exit 2
sed '/DEBUGINFO/d' "$3" > "$2"
"#;

#[cfg(unix)]
const FAILING_STRIP: &str = r#"#!/bin/sh
echo "strip: $3: file format not recognized" >&2
exit 1
"#;

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
pub(crate) fn fake_cargo(dir: &Path) -> PathBuf {
    write_script(dir, "cargo", FAKE_CARGO)
}

#[cfg(unix)]
pub(crate) fn fake_strip(dir: &Path) -> PathBuf {
    write_script(dir, "strip", FAKE_STRIP)
}

#[cfg(unix)]
pub(crate) fn failing_strip(dir: &Path) -> PathBuf {
    write_script(dir, "strip", FAILING_STRIP)
}

/// Arguments the fake cargo was last invoked with, one per element.
#[cfg(unix)]
pub(crate) fn recorded_cargo_args(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("cargo.args"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
