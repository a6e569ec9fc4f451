use super::SchemaKey;

use {hashbrown::HashMap, std::sync::Arc};

/// Mapping from fully qualified name to the named type it denotes
///
/// Entries are only ever added: a name, once registered, keeps pointing to
/// the same node. Aliases are registered as additional names pointing to the
/// same node.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
	symbols: HashMap<String, Symbol>,
}

/// An entry of the [`SymbolTable`]
#[derive(Clone, Debug)]
pub struct Symbol {
	key: SchemaKey,
	definition: Arc<serde_json::Value>,
}

impl Symbol {
	pub(crate) fn new(key: SchemaKey, definition: Arc<serde_json::Value>) -> Self {
		Self { key, definition }
	}

	/// Where the named type lives in the registry's node arena
	pub fn key(&self) -> SchemaKey {
		self.key
	}

	/// The schema JSON the named type was defined with
	///
	/// Registering the same name again is only allowed with an identical
	/// definition.
	pub fn definition(&self) -> &serde_json::Value {
		&self.definition
	}

	pub(crate) fn shared_definition(&self) -> &Arc<serde_json::Value> {
		&self.definition
	}
}

impl SymbolTable {
	pub fn get(&self, fully_qualified_name: &str) -> Option<&Symbol> {
		self.symbols.get(fully_qualified_name)
	}

	pub fn contains(&self, fully_qualified_name: &str) -> bool {
		self.symbols.contains_key(fully_qualified_name)
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// All registered fully qualified names (including aliases), in no
	/// particular order
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.symbols.keys().map(String::as_str)
	}

	pub(crate) fn insert(&mut self, fully_qualified_name: String, symbol: Symbol) {
		self.symbols.insert(fully_qualified_name, symbol);
	}

	/// Commit the symbols staged by a successful load
	pub(crate) fn extend(&mut self, staged: SymbolTable) {
		self.symbols.extend(staged.symbols);
	}
}
