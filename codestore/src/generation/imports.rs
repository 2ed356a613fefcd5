//! Import resolution for fully-qualified PHP names.

use std::collections::{HashMap, HashSet};

use codestore_core::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

/// Resolves fully-qualified names into `use` statements and local names.
///
/// Names are collected with [`add_name`](Self::add_name), then resolved once
/// by [`prepare`](Self::prepare). Names that share a short name with another
/// referenced name are imported under a generated alias
/// (`<ShortName>Alias<N>`), numbered by one counter for the whole resolution.
///
/// # Example
///
/// ```
/// use codestore::generation::ImportResolver;
///
/// let mut imports = ImportResolver::new("App\\Model");
/// imports.add_name("\\Foo\\Bar\\ClassTwo").unwrap();
/// imports.add_name("\\Bar\\Foo\\ClassTwo").unwrap();
/// imports.add_name("\\Foo\\Bar\\ClassOne").unwrap();
/// imports.prepare();
///
/// assert_eq!(
///     imports.imports().unwrap(),
///     [
///         "use Bar\\Foo\\ClassTwo as ClassTwoAlias1;",
///         "use Foo\\Bar\\ClassOne;",
///         "use Foo\\Bar\\ClassTwo as ClassTwoAlias2;",
///     ]
/// );
/// assert_eq!(imports.simplified_name("Foo\\Bar\\ClassOne").unwrap(), "ClassOne");
/// ```
#[derive(Debug, Clone)]
pub struct ImportResolver {
    /// Namespace of the generated file, without leading or trailing `\`.
    namespace: String,
    /// Referenced names without leading `\`, in insertion order.
    names: IndexSet<String>,
    resolution: Option<Resolution>,
}

#[derive(Debug, Clone, Default)]
struct Resolution {
    /// Sorted `use` statements.
    imports: Vec<String>,
    /// `\`-prefixed fully-qualified name -> local name, in insertion order.
    aliases: IndexMap<String, String>,
}

impl ImportResolver {
    /// Create a resolver for code living in `namespace` (empty for the
    /// global namespace).
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.trim_matches('\\').to_string(),
            names: IndexSet::new(),
            resolution: None,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register a referenced name. Adding a name twice has no effect.
    pub fn add_name(&mut self, name: &str) -> Result<()> {
        if self.resolution.is_some() {
            return Err(Box::new(Error::AlreadyPrepared {
                name: name.to_string(),
            }));
        }

        let normalized = normalize(name);
        if normalized.split('\\').any(str::is_empty) {
            return Err(Box::new(Error::InvalidName {
                name: name.to_string(),
            }));
        }

        self.names.insert(normalized.to_string());
        Ok(())
    }

    /// Register several names.
    pub fn add_names<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_name(name.as_ref())?;
        }
        Ok(())
    }

    /// Check if any name has been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_prepared(&self) -> bool {
        self.resolution.is_some()
    }

    /// Resolve all registered names. Calling this again has no effect.
    #[tracing::instrument(level = "debug", skip_all, fields(namespace = %self.namespace, names = self.names.len()))]
    pub fn prepare(&mut self) {
        if self.resolution.is_some() {
            return;
        }
        let resolution = resolve(&self.namespace, &self.names);
        debug!(
            imports = resolution.imports.len(),
            "import resolution prepared"
        );
        self.resolution = Some(resolution);
    }

    /// The `use` statements, sorted by their text.
    pub fn imports(&self) -> Result<&[String]> {
        Ok(&self.resolution()?.imports)
    }

    /// Fully-qualified names (with leading `\`) and their local names, in the
    /// order the names were added.
    ///
    /// Global names and names from the current namespace need no import and
    /// are not listed.
    pub fn replace_pairs(&self) -> Result<&IndexMap<String, String>> {
        Ok(&self.resolution()?.aliases)
    }

    /// The name to use in code for a fully-qualified name.
    ///
    /// Global names resolve to themselves (`\Throwable`) and added names from
    /// the current namespace to their short name. Names that were never added
    /// stay fully qualified, since their short name is not reserved.
    pub fn simplified_name(&self, name: &str) -> Result<String> {
        let resolution = self.resolution()?;
        let normalized = normalize(name);

        if let Some(alias) = resolution.aliases.get(&format!("\\{normalized}")) {
            return Ok(alias.clone());
        }
        match normalized.rsplit_once('\\') {
            Some((namespace, short))
                if namespace == self.namespace && self.names.contains(normalized) =>
            {
                Ok(short.to_string())
            }
            _ => Ok(format!("\\{normalized}")),
        }
    }

    /// Replace every resolved fully-qualified name in `text` by its local
    /// name. Longer names are replaced first.
    pub fn simplify_text(&self, text: &str) -> Result<String> {
        let resolution = self.resolution()?;

        let mut pairs: Vec<(&String, &String)> = resolution.aliases.iter().collect();
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

        let mut text = text.to_string();
        for (name, alias) in pairs {
            text = replace_name(&text, name, alias);
        }
        Ok(text)
    }

    fn resolution(&self) -> Result<&Resolution> {
        self.resolution
            .as_ref()
            .ok_or_else(|| Box::new(Error::NotPrepared))
    }
}

fn normalize(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

fn short_name(name: &str) -> &str {
    name.rsplit_once('\\').map_or(name, |(_, short)| short)
}

/// Compute imports and aliases for `names` referenced from `namespace`.
///
/// Class names are case-insensitive, so short names are compared in lower
/// case.
fn resolve(namespace: &str, names: &IndexSet<String>) -> Resolution {
    // Short names already meaning something without an import.
    let mut reserved: HashSet<String> = HashSet::new();
    let mut groups: IndexMap<String, Vec<&str>> = IndexMap::new();

    for name in names {
        match name.rsplit_once('\\') {
            None => {
                reserved.insert(name.to_ascii_lowercase());
            }
            Some((ns, short)) if ns == namespace => {
                reserved.insert(short.to_ascii_lowercase());
            }
            Some((_, short)) => groups
                .entry(short.to_ascii_lowercase())
                .or_default()
                .push(name),
        }
    }

    let mut taken = reserved.clone();
    let mut chosen: HashMap<&str, String> = HashMap::new();
    let mut colliding: Vec<(String, Vec<&str>)> = Vec::new();

    for (key, members) in groups {
        if members.len() == 1 && !reserved.contains(&key) {
            chosen.insert(members[0], short_name(members[0]).to_string());
            taken.insert(key);
        } else {
            colliding.push((key, members));
        }
    }

    colliding.sort_by(|a, b| a.0.cmp(&b.0));
    let mut counter = 0;
    for (_, mut members) in colliding {
        members.sort_unstable();
        for name in members {
            let alias = next_alias(short_name(name), &mut counter, &taken);
            trace!(name, alias = %alias, "aliased colliding name");
            taken.insert(alias.to_ascii_lowercase());
            chosen.insert(name, alias);
        }
    }

    let mut imports = Vec::with_capacity(chosen.len());
    let mut aliases = IndexMap::with_capacity(chosen.len());
    for name in names {
        let Some(alias) = chosen.remove(name.as_str()) else {
            continue;
        };
        if alias == short_name(name) {
            imports.push(format!("use {name};"));
        } else {
            imports.push(format!("use {name} as {alias};"));
        }
        aliases.insert(format!("\\{name}"), alias);
    }
    imports.sort();

    Resolution { imports, aliases }
}

/// Next `<short>Alias<N>` not in `taken` (lower case), advancing the shared
/// counter.
fn next_alias(short: &str, counter: &mut usize, taken: &HashSet<String>) -> String {
    loop {
        *counter += 1;
        let candidate = format!("{short}Alias{counter}");
        if !taken.contains(&candidate.to_ascii_lowercase()) {
            return candidate;
        }
    }
}

/// Replace whole occurrences of the fully-qualified `name` in `text`.
fn replace_name(text: &str, name: &str, alias: &str) -> String {
    let is_name_char = |c: char| c.is_alphanumeric() || c == '_' || c == '\\';

    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for (start, _) in text.match_indices(name) {
        let end = start + name.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        if start < last || before.is_some_and(is_name_char) || after.is_some_and(is_name_char) {
            continue;
        }
        result.push_str(&text[last..start]);
        result.push_str(alias);
        last = end;
    }
    result.push_str(&text[last..]);
    result
}
