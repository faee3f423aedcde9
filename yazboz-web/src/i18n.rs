use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;

const LOCALE_KEY: &str = "yazboz.locale";
const DEFAULT_LANG: &str = "tr";

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
}

const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "tr",
        name: "Türkçe",
    },
    LocaleMeta {
        code: "en",
        name: "English",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("tr", include_str!("../i18n/tr.json")),
    ("en", include_str!("../i18n/en.json")),
];

pub struct I18nBundle {
    pub lang: String,
    translations: Value,
    fallback: Value,
}

fn load_translations(lang: &str) -> Option<Value> {
    let bundle = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))?;
    serde_json::from_str(bundle).ok()
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    let translations = load_translations(lang)?;
    let fallback = load_translations(DEFAULT_LANG)?;
    Some(I18nBundle {
        lang: lang.to_string(),
        translations,
        fallback,
    })
}

fn empty_bundle() -> I18nBundle {
    I18nBundle {
        lang: DEFAULT_LANG.to_string(),
        translations: Value::Object(serde_json::Map::new()),
        fallback: Value::Object(serde_json::Map::new()),
    }
}

/// Supported locales with their native names.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

fn saved_lang() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(LOCALE_KEY).ok().flatten())
            .unwrap_or_else(|| DEFAULT_LANG.to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        DEFAULT_LANG.to_string()
    }
}

thread_local! {
    static CURRENT: RefCell<I18nBundle> = RefCell::new(
        build_bundle(&saved_lang())
            .or_else(|| build_bundle(DEFAULT_LANG))
            .unwrap_or_else(empty_bundle),
    );
}

/// Switch the active language. Unknown codes are ignored.
///
/// In the browser the choice is written to localStorage and `<html lang>`
/// is updated.
pub fn set_lang(lang: &str) {
    let Some(bundle) = build_bundle(lang) else {
        log::debug!("ignoring unknown locale {lang}");
        return;
    };
    CURRENT.with(|cell| cell.replace(bundle));
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
        {
            let _ = el.set_attribute("lang", lang);
        }
        if let Some(storage) = web_sys::window().and_then(|win| win.local_storage().ok().flatten())
        {
            let _ = storage.set_item(LOCALE_KEY, lang);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = LOCALE_KEY;
    }
}

#[must_use]
pub fn current_lang() -> String {
    CURRENT.with(|c| c.borrow().lang.clone())
}

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = value.as_str()?.to_string();
    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    CURRENT.with(|cell| {
        let bundle = cell.borrow();
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, args))
            .or_else(|| get_nested_value(&bundle.fallback, key).and_then(|v| render_value(v, args)))
    })
}

/// Translate a key to the current language, falling back to Turkish and
/// then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate with `{name}` placeholders filled from `args`.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

/// Shorthand for a translation with a single placeholder.
#[must_use]
pub fn tr1(key: &str, name: &str, value: &str) -> String {
    let args = BTreeMap::from([(name, value)]);
    tr(key, Some(&args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(value: &Value, prefix: &str, out: &mut Vec<String>) {
        if let Value::Object(map) = value {
            for (k, v) in map {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                if v.is_object() {
                    keys(v, &path, out);
                } else {
                    out.push(path);
                }
            }
        }
    }

    #[test]
    fn defaults_to_turkish() {
        set_lang("tr");
        assert_eq!(current_lang(), "tr");
        assert_eq!(t("scoreboard.exit"), "Çıkış");
    }

    #[test]
    fn switches_language_and_ignores_unknown_codes() {
        set_lang("en");
        assert_eq!(t("scoreboard.exit"), "Exit");
        set_lang("xx");
        assert_eq!(current_lang(), "en");
        set_lang("tr");
    }

    #[test]
    fn substitutes_placeholders_and_falls_back_to_key() {
        set_lang("tr");
        assert_eq!(tr1("setup.player_label", "n", "3"), "3. oyuncu");
        assert_eq!(t("no.such.key"), "no.such.key");
    }

    #[test]
    fn locales_share_the_same_keys() {
        let mut tr_keys = Vec::new();
        let mut en_keys = Vec::new();
        keys(&load_translations("tr").unwrap(), "", &mut tr_keys);
        keys(&load_translations("en").unwrap(), "", &mut en_keys);
        assert_eq!(tr_keys, en_keys);
    }

    #[test]
    fn quick_preset_keys_resolve() {
        set_lang("en");
        for kind in yazboz_core::GameKind::ALL {
            for preset in yazboz_core::presets(kind) {
                assert_ne!(t(preset.key), preset.key);
            }
        }
        set_lang("tr");
    }
}
