use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::smtp_verify::error::SmtpVerifyError;
use crate::smtp_verify::types::{ProbeStage, SmtpReply};

/// Plaintext SMTP session limited to greeting and `QUIT`.
pub(crate) struct SmtpSession {
    host: String,
    reader: BufReader<TcpStream>,
    idle_timeout: Duration,
    pub transcript: Vec<String>,
}

impl SmtpSession {
    pub(crate) async fn connect(
        host: &str,
        addresses: &[SocketAddr],
        connect_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, SmtpVerifyError> {
        let mut last_err = None;
        for addr in addresses {
            match timeout(connect_timeout, TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => {
                    return Ok(Self {
                        host: host.to_string(),
                        reader: BufReader::new(stream),
                        idle_timeout,
                        transcript: Vec::new(),
                    });
                }
                Ok(Err(err)) => {
                    last_err = Some(SmtpVerifyError::Connect {
                        host: format!("{host} ({addr})"),
                        source: err,
                    })
                }
                Err(_) => {
                    last_err = Some(SmtpVerifyError::timeout(
                        ProbeStage::Connect,
                        connect_timeout,
                    ))
                }
            }
        }
        Err(last_err.unwrap_or(SmtpVerifyError::NoAddresses {
            host: host.to_string(),
        }))
    }

    pub(crate) fn record(&mut self, direction: &str, message: &str) {
        self.transcript
            .push(format!("[{}] {direction}: {message}", self.host));
    }

    /// Reads the banner; the whole multi-line reply must arrive within
    /// `greeting_timeout`, each line within the idle timeout.
    pub(crate) async fn read_greeting(
        &mut self,
        greeting_timeout: Duration,
    ) -> Result<SmtpReply, SmtpVerifyError> {
        let reply = timeout(greeting_timeout, self.read_reply())
            .await
            .map_err(|_| SmtpVerifyError::timeout(ProbeStage::Greeting, greeting_timeout))??;
        self.record_reply(&reply);
        Ok(reply)
    }

    pub(crate) async fn send_command(&mut self, command: &str) -> Result<(), SmtpVerifyError> {
        self.record("C", command);
        let mut data = command.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        let idle = self.idle_timeout;
        let stream = self.reader.get_mut();
        timeout(idle, async {
            stream.write_all(&data).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| SmtpVerifyError::timeout(ProbeStage::Idle, idle))?
        .map_err(SmtpVerifyError::io)
    }

    /// Sends `QUIT`, waits briefly for the reply and shuts the socket down.
    pub(crate) async fn quit(mut self) -> Vec<String> {
        if self.send_command("QUIT").await.is_ok() {
            if let Ok(reply) = self.read_reply().await {
                self.record_reply(&reply);
            }
        }
        let idle = self.idle_timeout;
        let _ = timeout(idle, self.reader.get_mut().shutdown()).await;
        self.transcript
    }

    async fn read_reply(&mut self) -> Result<SmtpReply, SmtpVerifyError> {
        let mut lines = Vec::new();
        let mut code: Option<u16> = None;
        loop {
            let line = self.read_line().await?;
            let Some(code_part) = line.get(..3) else {
                return Err(SmtpVerifyError::Protocol(format!("invalid reply: {line}")));
            };
            let parsed_code = code_part
                .parse::<u16>()
                .map_err(|_| SmtpVerifyError::Protocol(format!("invalid code in line: {line}")))?;
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(SmtpVerifyError::Protocol(format!(
                        "inconsistent reply codes: {existing} vs {parsed_code}"
                    )));
                }
            } else {
                code = Some(parsed_code);
            }
            let is_last = line.as_bytes().get(3) != Some(&b'-');
            lines.push(line.get(4..).unwrap_or_default().to_string());
            if is_last {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or_default(),
            lines,
        })
    }

    async fn read_line(&mut self) -> Result<String, SmtpVerifyError> {
        let idle = self.idle_timeout;
        let mut raw = String::new();
        let read = timeout(idle, self.reader.read_line(&mut raw))
            .await
            .map_err(|_| SmtpVerifyError::timeout(ProbeStage::Idle, idle))?
            .map_err(SmtpVerifyError::io)?;
        if read == 0 {
            return Err(SmtpVerifyError::io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed",
            )));
        }
        let trimmed = raw.trim_end_matches(['\r', '\n']);
        Ok(trimmed.to_string())
    }

    fn record_reply(&mut self, reply: &SmtpReply) {
        if reply.lines.is_empty() {
            self.record("S", &format!("{}", reply.code));
        } else {
            for line in reply.lines.clone() {
                self.record("S", &format!("{} {}", reply.code, line));
            }
        }
    }
}
