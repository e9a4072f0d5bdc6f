pub(crate) fn prefix(prefix: &str, main: &str) -> String {
    let mut string = String::with_capacity(prefix.len() + main.len());
    string.push_str(prefix);
    string.push_str(main);
    string
}

/// Derives a value usable as an XML `id` attribute from a file name.
///
/// Colons and whitespace are removed; if the remainder does not begin
/// with a letter, it is prefixed with `id`.
pub(crate) fn to_xml_id(name: &str) -> String {
    const ID_PREFIX: &str = "id";

    let id: String = name
        .chars()
        .filter(|c| *c != ':' && !c.is_whitespace())
        .collect();

    match id.chars().next() {
        Some(first) if first.is_alphabetic() => id,
        _ => prefix(ID_PREFIX, &id),
    }
}
