use std::path::{Path, PathBuf};

use git2::{Direction, Repository as Git2Repo};

use crate::conventional::classify_header;
use crate::domain::{CommitCategory, CommitRecord, TagPattern};
use crate::error::{Result, ShipitError};
use crate::git::newest_matching_tag;

/// `git2`-backed repository bound to one release remote.
///
/// Every operation opens its own handle on the repository, so one value can
/// serve concurrent history reads from several threads.
pub struct Git2Repository {
    path: PathBuf,
    remote: String,
}

impl Git2Repository {
    /// Discover the git repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P, remote: impl Into<String>) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        let path = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();

        Ok(Git2Repository {
            path,
            remote: remote.into(),
        })
    }

    /// Name of the remote releases are pushed to
    pub fn remote_name(&self) -> &str {
        &self.remote
    }

    /// URL of the release remote, if configured
    pub fn remote_url(&self) -> Result<Option<String>> {
        let repo = self.handle()?;
        let remote = self.find_remote(&repo)?;
        Ok(remote.url().map(str::to_string))
    }

    fn handle(&self) -> Result<Git2Repo> {
        Ok(Git2Repo::open(&self.path)?)
    }

    fn find_remote<'r>(&self, repo: &'r Git2Repo) -> Result<git2::Remote<'r>> {
        repo.find_remote(&self.remote)
            .map_err(|e| ShipitError::remote(format!("Remote '{}' not found: {}", self.remote, e)))
    }

    fn push_refspec(&self, refspec: &str) -> Result<()> {
        let repo = self.handle()?;
        let mut remote = self.find_remote(&repo)?;

        let mut callbacks = remote_callbacks();
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => {
                tracing::warn!(refname, status, "remote rejected reference update");
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}: {}",
                    refname, status
                )))
            }
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ShipitError::remote(format!("Network error during push: {}", e))
                } else {
                    ShipitError::remote(format!("Push of '{}' failed: {}", refspec, e))
                }
            })
    }
}

impl super::Repository for Git2Repository {
    fn fetch_tags(&self) -> Result<()> {
        let repo = self.handle()?;
        let mut remote = self.find_remote(&repo)?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());

        remote
            .fetch(
                &["+refs/tags/*:refs/tags/*"],
                Some(&mut fetch_options),
                None,
            )
            .map_err(|e| {
                ShipitError::remote(format!(
                    "Failed to fetch tags from remote '{}': {}",
                    self.remote, e
                ))
            })
    }

    fn latest_tag(&self, pattern: &TagPattern) -> Result<Option<String>> {
        let repo = self.handle()?;
        let mut remote = self.find_remote(&repo)?;

        let connection = remote
            .connect_auth(Direction::Fetch, Some(remote_callbacks()), None)
            .map_err(|e| {
                ShipitError::remote(format!(
                    "Cannot connect to remote '{}': {}",
                    self.remote, e
                ))
            })?;

        let tags: Vec<String> = connection
            .list()?
            .iter()
            .filter_map(|head| head.name().strip_prefix("refs/tags/"))
            .map(|name| name.trim_end_matches("^{}").to_string())
            .collect();

        Ok(newest_matching_tag(tags.iter().map(String::as_str), pattern).map(str::to_string))
    }

    fn log(&self, category: CommitCategory, since: Option<&str>) -> Result<Vec<CommitRecord>> {
        let repo = self.handle()?;

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(tag) = since {
            let tagged = repo
                .revparse_single(&format!("refs/tags/{}", tag))
                .and_then(|object| object.peel_to_commit())
                .map_err(|e| {
                    ShipitError::tag(format!(
                        "Cannot resolve tag '{}' locally (are tags fetched?): {}",
                        tag, e
                    ))
                })?;
            revwalk.hide(tagged.id())?;
        }

        let mut records = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            let subject = commit.summary().unwrap_or_default();

            if classify_header(subject) != Some(category) {
                continue;
            }

            let short_id = commit.as_object().short_id()?;
            records.push(CommitRecord::new(
                subject,
                short_id.as_str().unwrap_or_default(),
            ));
        }

        Ok(records)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let repo = self.handle()?;
        let head = repo.head()?.peel_to_commit()?;

        repo.tag_lightweight(name, head.as_object(), false)
            .map_err(|e| ShipitError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        self.push_refspec(&format!("refs/tags/{0}:refs/tags/{0}", name))
    }

    fn delete_local_tag(&self, name: &str) -> Result<()> {
        let repo = self.handle()?;
        repo.tag_delete(name)
            .map_err(|e| ShipitError::tag(format!("Cannot delete tag '{}': {}", name, e)))
    }

    fn delete_remote_tag(&self, name: &str) -> Result<()> {
        self.push_refspec(&format!(":refs/tags/{}", name))
    }
}

/// Credential lookup shared by fetch, list and push: SSH keys from `~/.ssh`,
/// then the SSH agent, then git's default credential helpers.
fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });
    callbacks
}
