
/// Redirects the process stdout to a temp file for the duration of
/// `f` and returns everything written to it. Lines echoed with the
/// console mirror bypass the test harness capture, so this is the only
/// way to observe them.
pub fn capture_stdout<F: FnOnce()>(f: F) -> String {
    use std::io::{Read, Seek, SeekFrom};
    use std::os::fd::{AsFd, AsRawFd};
    use std::sync::{Mutex, PoisonError};

    // The redirect is process-wide; tests using it must take turns.
    static REDIRECT: Mutex<()> = Mutex::new(());
    let _guard = REDIRECT.lock().unwrap_or_else(PoisonError::into_inner);

    let mut reader = tempfile::tempfile().unwrap();
    let writer = reader.try_clone().unwrap();

    let saved = unsafe { libc::dup(libc::STDOUT_FILENO) };
    unsafe { libc::dup2(writer.as_fd().as_raw_fd(), libc::STDOUT_FILENO) };

    f();

    unsafe { libc::dup2(saved, libc::STDOUT_FILENO) };
    unsafe { libc::close(saved) };

    reader.seek(SeekFrom::Start(0)).unwrap();
    let mut output = String::new();
    reader.read_to_string(&mut output).unwrap();
    output
}
