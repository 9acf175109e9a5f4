//! ARIA Attribute Table
//!
//! The fixed vocabulary of recognized ARIA state and property names.
//! Attributes that merely share the `aria-` prefix are not in here.

/// A recognized ARIA state or property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDef {
    pub name: &'static str,
    /// Permitted on every role
    pub global: bool,
}

const fn attr(name: &'static str) -> AttributeDef {
    AttributeDef { name, global: false }
}

const fn global(name: &'static str) -> AttributeDef {
    AttributeDef { name, global: true }
}

/// Sorted by name for binary search
pub static ARIA_ATTRIBUTES: &[AttributeDef] = &[
    attr("aria-activedescendant"),
    global("aria-atomic"),
    attr("aria-autocomplete"),
    global("aria-busy"),
    attr("aria-checked"),
    attr("aria-colcount"),
    attr("aria-colindex"),
    attr("aria-colspan"),
    global("aria-controls"),
    global("aria-current"),
    global("aria-describedby"),
    global("aria-details"),
    global("aria-disabled"),
    global("aria-dropeffect"),
    global("aria-errormessage"),
    attr("aria-expanded"),
    global("aria-flowto"),
    global("aria-grabbed"),
    global("aria-haspopup"),
    global("aria-hidden"),
    global("aria-invalid"),
    global("aria-keyshortcuts"),
    global("aria-label"),
    global("aria-labelledby"),
    attr("aria-level"),
    global("aria-live"),
    attr("aria-modal"),
    attr("aria-multiline"),
    attr("aria-multiselectable"),
    attr("aria-orientation"),
    global("aria-owns"),
    attr("aria-placeholder"),
    attr("aria-posinset"),
    attr("aria-pressed"),
    attr("aria-readonly"),
    global("aria-relevant"),
    attr("aria-required"),
    global("aria-roledescription"),
    attr("aria-rowcount"),
    attr("aria-rowindex"),
    attr("aria-rowspan"),
    attr("aria-selected"),
    attr("aria-setsize"),
    attr("aria-sort"),
    attr("aria-valuemax"),
    attr("aria-valuemin"),
    attr("aria-valuenow"),
    attr("aria-valuetext"),
];

/// Look up an attribute definition. Names compare case-insensitively.
pub fn lookup(name: &str) -> Option<&'static AttributeDef> {
    let name = name.to_ascii_lowercase();
    ARIA_ATTRIBUTES
        .binary_search_by(|def| def.name.cmp(name.as_str()))
        .ok()
        .map(|idx| &ARIA_ATTRIBUTES[idx])
}

/// Whether `name` is a recognized ARIA state or property
pub fn is_valid_attr(name: &str) -> bool {
    lookup(name).is_some()
}

/// Whether `name` is a global ARIA attribute
pub fn is_global(name: &str) -> bool {
    lookup(name).is_some_and(|def| def.global)
}

/// Iterate the global attribute names
pub fn global_attrs() -> impl Iterator<Item = &'static str> {
    ARIA_ATTRIBUTES.iter().filter(|def| def.global).map(|def| def.name)
}
