//! Name helpers shared by the analyzers.

/// Builtin types and typing generics that never count as coupling.
const BUILTIN_NAMES: &[&str] = &[
    // builtins
    "object", "type", "int", "float", "complex", "bool", "str", "bytes", "bytearray",
    "memoryview", "list", "dict", "set", "frozenset", "tuple", "range", "slice", "None",
    "NoneType", "Ellipsis", "NotImplemented", "property", "staticmethod", "classmethod",
    "super", "len", "print", "isinstance", "issubclass", "getattr", "setattr", "hasattr",
    "iter", "next", "enumerate", "zip", "map", "filter", "sorted", "reversed", "min", "max",
    "sum", "any", "all", "abs", "round", "open", "repr", "hash", "id", "callable", "vars",
    "self", "cls",
    // exceptions
    "BaseException", "Exception", "ValueError", "TypeError", "KeyError", "IndexError",
    "AttributeError", "RuntimeError", "NotImplementedError", "StopIteration", "OSError",
    "IOError", "LookupError", "ArithmeticError", "ZeroDivisionError", "AssertionError",
    "ImportError", "FileNotFoundError", "PermissionError", "TimeoutError",
    // typing
    "Any", "Optional", "Union", "List", "Dict", "Set", "FrozenSet", "Tuple", "Type",
    "Callable", "Iterable", "Iterator", "Generator", "AsyncIterator", "AsyncGenerator",
    "Awaitable", "Coroutine", "Sequence", "MutableSequence", "Mapping", "MutableMapping",
    "Collection", "Container", "Generic", "Protocol", "TypeVar", "ClassVar", "Final",
    "Literal", "Annotated", "NoReturn", "Never", "Self", "TypedDict", "NamedTuple",
    "ABC", "ABCMeta",
];

/// Last dotted segment of a name as written (`pkg.mod.Base` is `Base`).
///
/// # Examples
///
/// ```
/// use ckmetrics_context::trailing_identifier;
///
/// assert_eq!(trailing_identifier("models.base.Entity"), "Entity");
/// assert_eq!(trailing_identifier("Entity"), "Entity");
/// ```
#[must_use]
pub fn trailing_identifier(name: &str) -> &str {
    let trimmed = name.trim();
    trimmed.rsplit('.').next().unwrap_or(trimmed)
}

#[must_use]
pub fn is_builtin_name(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}
