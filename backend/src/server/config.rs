//! Server settings and the configuration object built from them.

use std::io;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use mailadmin::domain::DEFAULT_ITEMS_PER_PAGE;
use mailadmin::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Settings read from `MAILADMIN_*` environment variables, configuration
/// files and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MAILADMIN")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL of the directory; without it the service runs on an
    /// empty in-memory directory.
    pub database_url: Option<String>,
    /// Apply pending schema migrations at startup.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Page size seeded into the in-memory parameter store.
    pub items_per_page: Option<usize>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
}

impl ServerSettings {
    /// Configured listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] for an unparsable address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|error| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {error}"),
            )
        })
    }

    /// Configured page size; zero and absent values use the default.
    pub fn items_per_page(&self) -> NonZeroUsize {
        self.items_per_page
            .and_then(NonZeroUsize::new)
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Read the session key, or generate a throwaway one in debug builds
    /// and when ephemeral keys are allowed.
    ///
    /// # Errors
    ///
    /// Fails when the key file is unreadable and ephemeral keys are not
    /// permitted.
    pub fn session_key(&self) -> io::Result<Key> {
        let path = self.session_key_file();
        match std::fs::read(path) {
            Ok(bytes) => Key::try_derive_from(&bytes).map_err(|error| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("session key at {} is unusable: {error}", path.display()),
                )
            }),
            Err(error) if cfg!(debug_assertions) || self.session_allow_ephemeral => {
                warn!(path = %path.display(), %error, "using temporary session key (dev only)");
                Ok(Key::generate())
            }
            Err(error) => Err(io::Error::other(format!(
                "failed to read session key at {}: {error}",
                path.display()
            ))),
        }
    }
}

/// Everything the HTTP server needs, resolved from [`ServerSettings`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) items_per_page: NonZeroUsize,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            db_pool: None,
        }
    }

    /// Page size used when no database provides one.
    #[must_use]
    pub fn with_items_per_page(mut self, items_per_page: NonZeroUsize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// Serve the directory from PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Settings loading from the environment.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 7] = [
        "MAILADMIN_BIND_ADDR",
        "MAILADMIN_DATABASE_URL",
        "MAILADMIN_RUN_MIGRATIONS",
        "MAILADMIN_ITEMS_PER_PAGE",
        "MAILADMIN_SESSION_KEY_FILE",
        "MAILADMIN_SESSION_ALLOW_EPHEMERAL",
        "MAILADMIN_COOKIE_SECURE",
    ];

    fn load() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("mailadmin")]).expect("settings load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_apply_without_configuration() {
        let _guard = lock_env(cleared());
        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket address")
        );
        assert!(settings.database_url.is_none());
        assert!(!settings.run_migrations);
        assert_eq!(settings.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(settings.session_key_file(), Path::new(DEFAULT_SESSION_KEY_FILE));
        assert!(settings.cookie_secure);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.retain(|(name, _)| {
            !matches!(
                *name,
                "MAILADMIN_BIND_ADDR" | "MAILADMIN_DATABASE_URL" | "MAILADMIN_ITEMS_PER_PAGE"
            )
        });
        vars.push(("MAILADMIN_BIND_ADDR", Some("127.0.0.1:9000".to_owned())));
        vars.push((
            "MAILADMIN_DATABASE_URL",
            Some("postgres://mail@localhost/directory".to_owned()),
        ));
        vars.push(("MAILADMIN_ITEMS_PER_PAGE", Some("15".to_owned())));
        let _guard = lock_env(vars);

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("socket address")
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://mail@localhost/directory")
        );
        assert_eq!(settings.items_per_page().get(), 15);
    }

    #[rstest]
    #[case(Some(0), 30)]
    #[case(None, 30)]
    #[case(Some(5), 5)]
    fn page_size_never_resolves_to_zero(#[case] raw: Option<usize>, #[case] expected: usize) {
        let settings = ServerSettings {
            bind_addr: None,
            database_url: None,
            run_migrations: false,
            items_per_page: raw,
            session_key_file: None,
            session_allow_ephemeral: false,
            cookie_secure: true,
        };
        assert_eq!(settings.items_per_page().get(), expected);
    }

    #[rstest]
    fn unparsable_bind_addresses_are_rejected() {
        let settings = ServerSettings {
            bind_addr: Some("not an address".to_owned()),
            database_url: None,
            run_migrations: false,
            items_per_page: None,
            session_key_file: None,
            session_allow_ephemeral: false,
            cookie_secure: true,
        };
        let error = settings.bind_addr().expect_err("invalid address");
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
    }

    #[rstest]
    fn session_keys_are_derived_from_the_key_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("session_key");
        std::fs::write(&path, [7_u8; 64]).expect("write key");
        let settings = ServerSettings {
            bind_addr: None,
            database_url: None,
            run_migrations: false,
            items_per_page: None,
            session_key_file: Some(path),
            session_allow_ephemeral: false,
            cookie_secure: true,
        };
        let first = settings.session_key().expect("key");
        let second = settings.session_key().expect("key");
        assert_eq!(first.master(), second.master());
    }
}
