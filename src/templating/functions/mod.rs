//! The named functions available inside templates.
//!
//! A [`FunctionLibrary`] is built fresh for every render. It closes over the
//! counters and template source of that render and over the [`Remotes`]
//! used for network lookups, then registers itself on a `Tera` instance.
//!
//! Tera identifiers cannot contain `-`, so every function uses a snake_case
//! name and takes its arguments by name:
//!
//! ```text
//! {{ user_lookup(id=item.author, bio=true) }}
//! {{ repo_stars(owner="LinuxSuRen", repo="yaml-readme") }}
//! {{ item.done | sanitize_render }}
//! ```
//!
//! Functions backed by the network never fail a render. See [`lookups`]
//! for the fallback of each one.

pub mod help;
pub mod lookups;
pub mod markup;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tera::{Tera, Value};

use super::context::RenderCounters;
use super::toc::extract_toc;
use super::utils::{optional_bool, optional_str, required_str};
use crate::remote::{RepoHost, Remotes};

/// A template function as stored in the library.
pub type TemplateFunction =
    Arc<dyn Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync>;

type RepoAccessor = fn(&dyn RepoHost, &str, &str) -> String;

fn text(value: String) -> tera::Result<Value> {
    Ok(Value::String(value))
}

/// Every function a template can call during one render.
#[derive(Clone)]
pub struct FunctionLibrary {
    functions: BTreeMap<&'static str, TemplateFunction>,
}

impl FunctionLibrary {
    /// Build the library for a render of `source` with the given counters.
    pub fn new(source: &str, counters: RenderCounters, remotes: Remotes) -> Self {
        let mut functions: BTreeMap<&'static str, TemplateFunction> = BTreeMap::new();

        functions.insert(
            "item_count",
            Arc::new(move |_: &HashMap<String, Value>| -> tera::Result<Value> {
                Ok(Value::from(counters.item_count))
            }),
        );
        functions.insert(
            "group_count",
            Arc::new(move |_: &HashMap<String, Value>| -> tera::Result<Value> {
                Ok(Value::from(counters.group_count))
            }),
        );

        let toc = extract_toc(source);
        functions.insert(
            "table_of_contents",
            Arc::new(move |_: &HashMap<String, Value>| text(toc.clone())),
        );

        functions.insert(
            "sanitize_render",
            Arc::new(|args: &HashMap<String, Value>| {
                text(args.get("value").map(markup::sanitize_render).unwrap_or_default())
            }),
        );
        functions.insert(
            "run_external_help",
            Arc::new(|args: &HashMap<String, Value>| {
                let command = required_str("run_external_help", args, "command")?;
                text(help::run_external_help(command))
            }),
        );

        Self::insert_markup(&mut functions);
        Self::insert_users(&mut functions, &remotes);
        Self::insert_repositories(&mut functions, &remotes);
        Self::insert_feeds(&mut functions, &remotes);

        Self {
            functions,
        }
    }

    fn insert_markup(functions: &mut BTreeMap<&'static str, TemplateFunction>) {
        functions.insert(
            "link",
            Arc::new(|args: &HashMap<String, Value>| {
                let text_arg = required_str("link", args, "text")?;
                let url = required_str("link", args, "url")?;
                text(markup::link(text_arg, url))
            }),
        );
        functions.insert(
            "link_or_empty",
            Arc::new(|args: &HashMap<String, Value>| {
                let text_arg = required_str("link_or_empty", args, "text")?;
                let url = required_str("link_or_empty", args, "url")?;
                text(markup::link_or_empty(text_arg, url))
            }),
        );
        functions.insert(
            "emoji_link",
            Arc::new(|args: &HashMap<String, Value>| {
                text(markup::emoji_link(required_str("emoji_link", args, "user")?))
            }),
        );
        functions.insert(
            "twitter_link",
            Arc::new(|args: &HashMap<String, Value>| {
                text(markup::twitter_link(required_str("twitter_link", args, "user")?))
            }),
        );
        functions.insert(
            "youtube_link",
            Arc::new(|args: &HashMap<String, Value>| {
                text(markup::youtube_link(required_str("youtube_link", args, "channel")?))
            }),
        );
        functions.insert(
            "github_id",
            Arc::new(|args: &HashMap<String, Value>| {
                text(markup::github_id(required_str("github_id", args, "link")?))
            }),
        );
        functions.insert(
            "star_history",
            Arc::new(|args: &HashMap<String, Value>| {
                let owner = required_str("star_history", args, "owner")?;
                let repo = required_str("star_history", args, "repo")?;
                text(markup::star_history(owner, repo))
            }),
        );
        functions.insert(
            "visitor_count",
            Arc::new(|args: &HashMap<String, Value>| {
                text(markup::visitor_count(required_str("visitor_count", args, "id")?))
            }),
        );
    }

    fn insert_users(functions: &mut BTreeMap<&'static str, TemplateFunction>, remotes: &Remotes) {
        let host = remotes.repo_host.clone();
        functions.insert(
            "user_lookup",
            Arc::new(move |args: &HashMap<String, Value>| {
                let id = required_str("user_lookup", args, "id")?;
                let bio = optional_bool(args, "bio", false);
                text(lookups::user_lookup(host.as_ref(), id, bio))
            }),
        );

        let host = remotes.repo_host.clone();
        functions.insert(
            "user_group_lookup",
            Arc::new(move |args: &HashMap<String, Value>| {
                let ids = required_str("user_group_lookup", args, "ids")?;
                let sep = optional_str(args, "sep", " ");
                text(lookups::user_group_lookup(host.as_ref(), ids, sep))
            }),
        );

        let host = remotes.repo_host.clone();
        functions.insert(
            "user_table",
            Arc::new(move |args: &HashMap<String, Value>| {
                text(lookups::user_table(host.as_ref(), required_str("user_table", args, "id")?))
            }),
        );

        let host = remotes.repo_host.clone();
        functions.insert(
            "pages_table",
            Arc::new(move |args: &HashMap<String, Value>| {
                text(lookups::pages_table(host.as_ref(), required_str("pages_table", args, "owner")?))
            }),
        );
    }

    fn insert_repositories(
        functions: &mut BTreeMap<&'static str, TemplateFunction>,
        remotes: &Remotes,
    ) {
        let accessors: [(&'static str, RepoAccessor); 7] = [
            ("repo_stars", lookups::repo_stars),
            ("repo_forks", lookups::repo_forks),
            ("repo_license", lookups::repo_license),
            ("repo_created_at", lookups::repo_created_at),
            ("repo_pushed_at", lookups::repo_pushed_at),
            ("repo_summary", lookups::repo_summary),
            ("contributor_table", lookups::contributor_table),
        ];

        for (name, accessor) in accessors {
            let host = remotes.repo_host.clone();
            functions.insert(
                name,
                Arc::new(move |args: &HashMap<String, Value>| {
                    let owner = required_str(name, args, "owner")?;
                    let repo = required_str(name, args, "repo")?;
                    text(accessor(host.as_ref(), owner, repo))
                }),
            );
        }
    }

    fn insert_feeds(functions: &mut BTreeMap<&'static str, TemplateFunction>, remotes: &Remotes) {
        let feeds = remotes.feeds.clone();
        functions.insert(
            "feed_latest_post",
            Arc::new(move |args: &HashMap<String, Value>| {
                let url = required_str("feed_latest_post", args, "url")?;
                let default = optional_str(args, "default", url);
                text(lookups::feed_latest_post(feeds.as_ref(), url, default))
            }),
        );

        let feeds = remotes.feeds.clone();
        functions.insert(
            "feed_latest_published",
            Arc::new(move |args: &HashMap<String, Value>| {
                let url = required_str("feed_latest_published", args, "url")?;
                text(lookups::feed_latest_published(feeds.as_ref(), url))
            }),
        );
    }

    /// Registered function names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.functions.keys().copied().collect()
    }

    /// Names of every function a template can call, without any render data.
    pub fn all_names() -> Vec<&'static str> {
        Self::new("", RenderCounters::default(), Remotes::offline()).names()
    }

    /// Invoke a function by name, as Tera would.
    pub fn call(&self, name: &str, args: &HashMap<String, Value>) -> Option<tera::Result<Value>> {
        self.functions.get(name).map(|function| function(args))
    }

    /// Register every function, plus the `sanitize_render` filter, on `tera`.
    pub fn register(&self, tera: &mut Tera) {
        for (name, function) in &self.functions {
            let function = Arc::clone(function);
            tera.register_function(name, move |args: &HashMap<String, Value>| function(args));
        }

        tera.register_filter(
            "sanitize_render",
            |value: &Value, _: &HashMap<String, Value>| text(markup::sanitize_render(value)),
        );
    }
}

impl std::fmt::Debug for FunctionLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionLibrary").field("functions", &self.names()).finish()
    }
}
