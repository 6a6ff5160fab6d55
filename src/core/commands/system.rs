use std::env;
use std::ffi::CStr;
use std::io;

use chrono::Local;

use super::{Command, CommandResult, IoContext};
use crate::core::env::Environment;
use crate::output::OutputSink;

const DATE_FORMAT: &str = "%A, %B %d, %Y %I:%M:%S %p";

#[derive(Clone)]
pub struct DateCommand;

impl Command for DateCommand {
    fn execute(
        &self,
        _args: &[String],
        _env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        out.output(&Local::now().format(DATE_FORMAT).to_string());
        Ok(None)
    }
}

#[derive(Clone)]
pub struct WhoamiCommand;

impl WhoamiCommand {
    /// Name of the effective user from the password database.
    fn passwd_name() -> Option<String> {
        // SAFETY: getpwuid returns either null or a pointer to static storage
        // that stays valid until the next getpw* call; the name is copied out
        // before returning.
        unsafe {
            let entry = libc::getpwuid(libc::geteuid());
            if entry.is_null() || (*entry).pw_name.is_null() {
                return None;
            }
            Some(CStr::from_ptr((*entry).pw_name).to_string_lossy().into_owned())
        }
    }
}

impl Command for WhoamiCommand {
    fn execute(
        &self,
        _args: &[String],
        _env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let name = Self::passwd_name()
            .or_else(|| env::var("USER").ok())
            .or_else(|| env::var("LOGNAME").ok())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "unable to determine user"))
            .context("whoami")?;

        out.output(&name);
        Ok(None)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemInfo {
    pub system: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

impl SystemInfo {
    pub fn query() -> io::Result<Self> {
        // SAFETY: utsname is plain data, zeroed is a valid initial value, and
        // uname fills every field with a NUL-terminated string on success.
        unsafe {
            let mut uts: libc::utsname = std::mem::zeroed();
            if libc::uname(&mut uts) != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(Self {
                system: field(&uts.sysname),
                release: field(&uts.release),
                version: field(&uts.version),
                machine: field(&uts.machine),
            })
        }
    }
}

fn field(raw: &[libc::c_char]) -> String {
    // SAFETY: the buffer comes from a successful uname call and is
    // NUL-terminated within its bounds.
    unsafe { CStr::from_ptr(raw.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

#[derive(Clone)]
pub struct UnameCommand;

impl Command for UnameCommand {
    fn execute(
        &self,
        _args: &[String],
        _env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let info = SystemInfo::query().context("uname")?;
        out.output(&format!("System: {}", info.system));
        out.output(&format!("Release: {}", info.release));
        out.output(&format!("Version: {}", info.version));
        out.output(&format!("Machine: {}", info.machine));
        Ok(None)
    }
}
