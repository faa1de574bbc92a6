//! Attribute rename table and the generic attribute pass.

use rustc_hash::FxHashMap;

use crate::dom::Attributes;

/// Markup attribute names that JSX spells differently.
const BUILTIN_RENAMES: &[(&str, &str)] = &[
    ("accept-charset", "acceptCharset"),
    ("accesskey", "accessKey"),
    ("allowfullscreen", "allowFullScreen"),
    ("autocomplete", "autoComplete"),
    ("autofocus", "autoFocus"),
    ("autoplay", "autoPlay"),
    ("cellpadding", "cellPadding"),
    ("cellspacing", "cellSpacing"),
    ("charset", "charSet"),
    ("class", "className"),
    ("clip-rule", "clipRule"),
    ("colspan", "colSpan"),
    ("contenteditable", "contentEditable"),
    ("crossorigin", "crossOrigin"),
    ("datetime", "dateTime"),
    ("enctype", "encType"),
    ("fill-rule", "fillRule"),
    ("for", "htmlFor"),
    ("formaction", "formAction"),
    ("frameborder", "frameBorder"),
    ("hreflang", "hrefLang"),
    ("http-equiv", "httpEquiv"),
    ("maxlength", "maxLength"),
    ("minlength", "minLength"),
    ("novalidate", "noValidate"),
    ("readonly", "readOnly"),
    ("referrerpolicy", "referrerPolicy"),
    ("rowspan", "rowSpan"),
    ("spellcheck", "spellCheck"),
    ("srcset", "srcSet"),
    ("stroke-linecap", "strokeLinecap"),
    ("stroke-linejoin", "strokeLinejoin"),
    ("stroke-width", "strokeWidth"),
    ("tabindex", "tabIndex"),
    ("usemap", "useMap"),
    ("xlink:href", "xlinkHref"),
    ("xml:space", "xmlSpace"),
];

/// Attribute-name lookup consulted by the mapper.
///
/// Immutable once built; names absent from the table pass through.
#[derive(Debug, Clone)]
pub struct AttributeRenameTable {
    renames: FxHashMap<String, String>,
}

impl Default for AttributeRenameTable {
    fn default() -> Self {
        Self::from_pairs(BUILTIN_RENAMES.iter().copied())
    }
}

impl AttributeRenameTable {
    /// Table holding exactly the given pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            renames: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Built-in table with user pairs layered on top.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut table = Self::default();
        for (from, to) in overrides {
            table.renames.insert(from.clone(), to.clone());
        }
        table
    }

    /// Target name for `name`; exact match first, then lower-cased.
    pub fn rename<'a>(&'a self, name: &'a str) -> &'a str {
        if let Some(target) = self.renames.get(name) {
            return target;
        }
        self.renames
            .get(&name.to_ascii_lowercase())
            .map_or(name, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    /// Generic pass applied to every tag before any tag-specific handler.
    ///
    /// Drops `style` and every `on*` handler, renames the rest through the
    /// table. Values are never touched and source order is kept.
    pub fn rewrite(&self, attrs: &Attributes) -> Attributes {
        let mut out = Attributes::new();
        for (key, value) in attrs.iter() {
            if is_dropped(key) {
                continue;
            }
            out.set_raw(self.rename(key).to_string(), value.map(str::to_string));
        }
        out
    }
}

/// Inline styles and event handler attributes never survive.
fn is_dropped(key: &str) -> bool {
    key.eq_ignore_ascii_case("style")
        || key
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}
