//! Repository tag protection endpoints.
//!
//! Each operation is one request: interpolate the path, build the request,
//! hand it to `ApiClient`. Errors from either step come back unchanged.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, Response};
use crate::transport::Transport;
use crate::types::{TagProtection, TagProtectionRequest};

/// Repository-scoped operations. Borrowed from an `ApiClient`; holds no state
/// of its own.
#[derive(Debug)]
pub struct RepositoriesService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<T> Clone for RepositoriesService<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RepositoriesService<'_, T> {}

impl<'a, T: Transport> RepositoriesService<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// List the tag protection rules of a repository.
    ///
    /// GitHub API docs: <https://docs.github.com/en/rest/repos/tags#list-tag-protection-states-for-a-repository>
    pub fn list_tag_protection(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<(Vec<TagProtection>, Response), ApiError> {
        let path = tag_protection_path(owner, repo);
        let request = self.client.new_request::<()>(HttpMethod::Get, &path, None)?;
        self.client.send(request)
    }

    /// Create a tag protection rule for `pattern`.
    ///
    /// Not idempotent: the server decides what a second call with the same
    /// pattern does.
    ///
    /// GitHub API docs: <https://docs.github.com/en/rest/repos/tags#create-a-tag-protection-state-for-a-repository>
    pub fn create_tag_protection(
        &self,
        owner: &str,
        repo: &str,
        pattern: &str,
    ) -> Result<(TagProtection, Response), ApiError> {
        let path = tag_protection_path(owner, repo);
        let body = TagProtectionRequest::new(pattern);
        let request = self.client.new_request(HttpMethod::Post, &path, Some(&body))?;
        self.client.send(request)
    }

    /// Delete a tag protection rule by id.
    ///
    /// GitHub API docs: <https://docs.github.com/en/rest/repos/tags#delete-a-tag-protection-state-for-a-repository>
    pub fn delete_tag_protection(
        &self,
        owner: &str,
        repo: &str,
        tag_protection_id: i64,
    ) -> Result<Response, ApiError> {
        let path = format!("{}/{tag_protection_id}", tag_protection_path(owner, repo));
        let request = self.client.new_request::<()>(HttpMethod::Delete, &path, None)?;
        self.client.send_empty(request)
    }
}

fn tag_protection_path(owner: &str, repo: &str) -> String {
    format!("repos/{owner}/{repo}/tags/protection")
}
