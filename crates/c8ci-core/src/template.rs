// ── Deployment descriptor placeholder substitution ──
//
// Fills `<placeholder>` tokens in an MTA descriptor with provisioning
// results. Replacement is literal substring substitution so values carrying
// `$`, `\`, or `&` are inserted verbatim.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use crate::error::CoreError;

pub const DEFAULT_CONNECTOR_NAME: &str = "sap-rfc-connector";

/// Values substituted into a descriptor template.
#[derive(Debug, Clone)]
pub struct PlaceholderValues {
    pub app_version: String,
    pub grpc_address: String,
    pub rest_address: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub token_url: String,
    pub zeebe_audience: String,
    /// Module name suffixed with `-<app_version>` on its `name:` line.
    pub connector_name: String,
}

impl PlaceholderValues {
    /// App version with every `.` replaced by `_` (`1.2.0` → `1_2_0`).
    pub fn mangled_version(&self) -> String {
        self.app_version.replace('.', "_")
    }

    /// Placeholder/value pairs in substitution order.
    fn pairs(&self) -> [(&'static str, String); 8] {
        [
            ("<app-version>", self.app_version.clone()),
            ("<mangled-version>", self.mangled_version()),
            ("<grpc-address>", self.grpc_address.clone()),
            ("<rest-address>", self.rest_address.clone()),
            ("<client-id>", self.client_id.clone()),
            ("<client-secret>", self.client_secret.expose_secret().to_owned()),
            ("<token-url>", self.token_url.clone()),
            ("<zeebe-audience>", self.zeebe_audience.clone()),
        ]
    }
}

/// Replace every occurrence of `placeholder` with `replacement`, literally.
pub fn replace_literal(content: &str, placeholder: &str, replacement: &str) -> String {
    content.replace(placeholder, replacement)
}

/// Apply all placeholder substitutions, then rename the connector module.
pub fn render(content: &str, values: &PlaceholderValues) -> Result<String, CoreError> {
    let mut rendered = content.to_owned();
    for (placeholder, value) in values.pairs() {
        rendered = replace_literal(&rendered, placeholder, &value);
    }

    let name_line = Regex::new(&format!(
        "(?mR)name: {}$",
        regex::escape(&values.connector_name)
    ))?;
    let renamed = format!("name: {}-{}", values.connector_name, values.app_version);
    Ok(name_line
        .replace_all(&rendered, NoExpand(&renamed))
        .into_owned())
}

/// What [`apply_in_place`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOutcome {
    pub path: PathBuf,
    pub backup: Option<PathBuf>,
    pub changed: bool,
}

/// `<path>.bak` next to the input file.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

/// Render `path` in place.
///
/// With `backup`, the original is copied to `<path>.bak` first and copied
/// back if the write fails. The backup is kept after success.
pub fn apply_in_place(
    path: &Path,
    values: &PlaceholderValues,
    backup: bool,
) -> Result<TemplateOutcome, CoreError> {
    let original = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;

    let backup = if backup {
        let bak = backup_path(path);
        fs::copy(path, &bak).map_err(|e| CoreError::io(&bak, e))?;
        info!(backup = %bak.display(), "created backup");
        Some(bak)
    } else {
        None
    };

    let rendered = render(&original, values)?;
    write_or_restore(path, &rendered, backup.as_deref(), |p, c| fs::write(p, c))?;

    info!(path = %path.display(), "replaced placeholders");
    Ok(TemplateOutcome {
        path: path.to_path_buf(),
        backup,
        changed: rendered != original,
    })
}

/// Write `contents` to `path`; on failure copy `backup` back over it.
fn write_or_restore(
    path: &Path,
    contents: &str,
    backup: Option<&Path>,
    write: impl FnOnce(&Path, &str) -> std::io::Result<()>,
) -> Result<(), CoreError> {
    let Err(err) = write(path, contents) else {
        return Ok(());
    };
    if let Some(bak) = backup {
        match fs::copy(bak, path) {
            Ok(_) => warn!(path = %path.display(), "write failed, restored from backup"),
            Err(restore) => warn!(path = %path.display(), "restore from backup failed: {restore}"),
        }
    }
    Err(CoreError::io(path, err))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values() -> PlaceholderValues {
        PlaceholderValues {
            app_version: "8.6.1".into(),
            grpc_address: "grpcs://abc.zeebe.example.com:443".into(),
            rest_address: "https://bru-2.zeebe.example.com/abc".into(),
            client_id: "worker".into(),
            client_secret: SecretString::from("p$1&\\x".to_owned()),
            token_url: "https://login.cloud.example.com/oauth/token".into(),
            zeebe_audience: "zeebe.example.com".into(),
            connector_name: DEFAULT_CONNECTOR_NAME.into(),
        }
    }

    #[test]
    fn replaces_every_occurrence() {
        assert_eq!(replace_literal("<a> and <a>", "<a>", "x"), "x and x");
    }

    #[test]
    fn absent_tokens_are_noop() {
        let input = "ID: sap-rfc\nversion: 1\n";
        assert_eq!(render(input, &values()).unwrap(), input);
    }

    #[test]
    fn renders_all_placeholders_literally() {
        let input = "\
version: <app-version>
id: rfc_<mangled-version>
grpc: <grpc-address>
rest: <rest-address>
client: <client-id>
secret: <client-secret>
secret-again: <client-secret>
token: <token-url>
audience: <zeebe-audience>
";
        let expected = "\
version: 8.6.1
id: rfc_8_6_1
grpc: grpcs://abc.zeebe.example.com:443
rest: https://bru-2.zeebe.example.com/abc
client: worker
secret: p$1&\\x
secret-again: p$1&\\x
token: https://login.cloud.example.com/oauth/token
audience: zeebe.example.com
";
        assert_eq!(render(input, &values()).unwrap(), expected);
    }

    #[test]
    fn renames_connector_only_at_line_end() {
        let input = "\
modules:
  - name: sap-rfc-connector
    type: java
  - name: sap-rfc-connector-db
requires:
  - name: sap-rfc-connector
";
        let expected = "\
modules:
  - name: sap-rfc-connector-8.6.1
    type: java
  - name: sap-rfc-connector-db
requires:
  - name: sap-rfc-connector-8.6.1
";
        assert_eq!(render(input, &values()).unwrap(), expected);

        assert_eq!(
            render(
                "modules:\r\n  - name: sap-rfc-connector\r\n  - name: sap-rfc-connector-db\r\n",
                &values()
            )
            .unwrap(),
            "modules:\r\n  - name: sap-rfc-connector-8.6.1\r\n  - name: sap-rfc-connector-db\r\n"
        );
    }

    #[test]
    fn version_with_dollar_is_not_expanded() {
        let mut vals = values();
        vals.app_version = "$1.0".into();
        assert_eq!(
            render("name: sap-rfc-connector", &vals).unwrap(),
            "name: sap-rfc-connector-$1.0"
        );
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/tmp/mtad.yaml")),
            PathBuf::from("/tmp/mtad.yaml.bak")
        );
    }

    #[test]
    fn apply_in_place_with_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mtad.yaml");
        fs::write(&path, "version: <app-version>\n").unwrap();

        let outcome = apply_in_place(&path, &values(), true).unwrap();

        assert!(outcome.changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "version: 8.6.1\n");
        let bak = outcome.backup.unwrap();
        assert_eq!(fs::read_to_string(bak).unwrap(), "version: <app-version>\n");
    }

    #[test]
    fn apply_in_place_without_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mtad.yaml");
        fs::write(&path, "nothing to do\n").unwrap();

        let outcome = apply_in_place(&path, &values(), false).unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.backup, None);
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn failed_write_restores_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mtad.yaml");
        fs::write(&path, "version: <app-version>\n").unwrap();
        let bak = backup_path(&path);
        fs::copy(&path, &bak).unwrap();

        // Truncate, then fail like a full disk would.
        let err = write_or_restore(&path, "version: 8.6.1\n", Some(&bak), |p, _| {
            fs::write(p, "vers")?;
            Err(std::io::Error::other("no space left on device"))
        })
        .unwrap_err();

        match err {
            CoreError::Io { path: failed, .. } => assert_eq!(failed, path.display().to_string()),
            other => panic!("expected Io error, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "version: <app-version>\n");
        assert!(bak.exists());
    }

    #[test]
    fn failed_write_without_backup_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mtad.yaml");
        fs::write(&path, "version: <app-version>\n").unwrap();

        let err = write_or_restore(&path, "version: 8.6.1\n", None, |_, _| {
            Err(std::io::Error::other("read-only file system"))
        })
        .unwrap_err();

        assert!(matches!(err, CoreError::Io { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "version: <app-version>\n");
    }

    #[test]
    fn missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = apply_in_place(&dir.path().join("absent.yaml"), &values(), true).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }
}
