// Built-in Cyrillic -> Latin renderings
//
// Values are pipe-delimited alternations. Multi-letter clusters are listed
// where their common rendering differs from the letter-by-letter one.

pub(crate) const FORWARD: &[(&str, &str)] = &[
    ("а", "a"),
    ("б", "b"),
    ("в", "v|w"),
    ("г", "g|h"),
    ("д", "d"),
    ("е", "e|ye|je|ё"),
    ("ё", "e|yo|jo|io|е"),
    ("ж", "zh|j"),
    ("з", "z"),
    ("и", "i|y"),
    ("й", "y|j|i"),
    ("к", "k|c|ck"),
    ("л", "l"),
    ("м", "m"),
    ("н", "n"),
    ("о", "o"),
    ("п", "p"),
    ("р", "r"),
    ("с", "s|c"),
    ("т", "t"),
    ("у", "u|ou"),
    ("ф", "f|ph"),
    ("х", "h|kh|x"),
    ("ц", "ts|tz|c|cz"),
    ("ч", "ch|tch"),
    ("ш", "sh"),
    ("щ", "sch|shch|sh"),
    ("ъ", "'"),
    ("ы", "y|i"),
    ("ь", "'"),
    ("э", "e"),
    ("ю", "yu|ju|iu"),
    ("я", "ya|ja|ia"),
    // clusters
    ("кс", "x|ks"),
    ("ий", "iy|ij|y|i"),
    ("ый", "y|iy"),
    ("дж", "j|dzh"),
    ("ья", "ya|ia"),
    ("ье", "ye|ie"),
    ("ью", "yu|iu"),
    ("ьё", "yo|io"),
];
