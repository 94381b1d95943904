use std::io::Read;

use log::debug;
use reqwest::blocking::{Client, Response};

use super::{BufferedLineReader, ByteSource, SourceError, SourceResult};

/// Connection parameters for the remote object store.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub host: String,
    pub port: u16,
    pub realm: String,
    pub user: String,
    pub password: String,
}

/// Byte source over an object held by the remote store.
///
/// The connect/authenticate handshake runs eagerly in [`RemoteSource::connect`]
/// and fails fast with `SourceError::Connection`; afterwards the object body
/// is pulled incrementally. No read timeout is configured, so a stalled
/// transport blocks the pull that hit it.
pub struct RemoteSource {
    body: Option<Response>,
}

impl RemoteSource {
    pub fn connect(config: &RemoteConfig, object: &str) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|err| SourceError::Connection(err.to_string()))?;
        let url = object_url(config, object);
        let response = client
            .get(&url)
            .basic_auth(&config.user, Some(&config.password))
            .send()
            .map_err(|err| SourceError::Connection(err.to_string()))?;
        if !response.status().is_success() {
            return Err(SourceError::Connection(format!(
                "{url}: {}",
                response.status()
            )));
        }
        debug!(
            "opened {object} on {}:{} (realm {})",
            config.host, config.port, config.realm
        );
        Ok(Self {
            body: Some(response),
        })
    }

    /// Wrap this source in a `BufferedLineReader`. Remote bodies expose no
    /// native line primitive, so `buffer_unit` must be positive here.
    pub fn into_lines(self, buffer_unit: usize) -> BufferedLineReader<RemoteSource> {
        BufferedLineReader::new(self, buffer_unit)
    }
}

impl ByteSource for RemoteSource {
    fn read(&mut self, max_bytes: usize) -> SourceResult<Vec<u8>> {
        let body = self.body.as_mut().ok_or(SourceError::Closed)?;
        let mut chunk = vec![0u8; max_bytes];
        let filled = body.read(&mut chunk).map_err(SourceError::Read)?;
        chunk.truncate(filled);
        Ok(chunk)
    }

    fn close(&mut self) -> SourceResult<()> {
        match self.body.take() {
            Some(_) => Ok(()),
            None => Err(SourceError::Closed),
        }
    }
}

fn object_url(config: &RemoteConfig, object: &str) -> String {
    format!(
        "http://{}:{}/{}/{}",
        config.host,
        config.port,
        config.realm.trim_matches('/'),
        object.trim_start_matches('/')
    )
}
