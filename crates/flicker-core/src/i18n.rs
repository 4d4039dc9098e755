//! Localized countdown unit labels.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Unit labels in the order days, hours, minutes, seconds.
type Labels = [&'static str; 4];

const KEYS: [&str; 4] = ["days", "hours", "minutes", "seconds"];

const TABLE: &[(&str, Labels)] = &[
    ("ar", ["أيام", "ساعات", "دقائق", "ثواني"]),
    ("bg", ["дни", "часа", "минути", "секунди"]),
    ("cs", ["dny", "hodiny", "minuty", "sekundy"]),
    ("da", ["dage", "timer", "minutter", "sekunder"]),
    ("de", ["Tage", "Stunden", "Minuten", "Sekunden"]),
    ("el", ["ημέρες", "ώρες", "λεπτά", "δευτερόλεπτα"]),
    ("en", ["days", "hours", "minutes", "seconds"]),
    ("es", ["días", "horas", "minutos", "segundos"]),
    ("fa", ["روز", "ساعت", "دقیقه", "ثانیه"]),
    ("fi", ["päivää", "tuntia", "minuuttia", "sekuntia"]),
    ("fr", ["jours", "heures", "minutes", "secondes"]),
    ("he", ["ימים", "שעות", "דקות", "שניות"]),
    ("hi", ["दिन", "घंटे", "मिनट", "सेकंड"]),
    ("hu", ["nap", "óra", "perc", "másodperc"]),
    ("it", ["giorni", "ore", "minuti", "secondi"]),
    ("ja", ["日", "時間", "分", "秒"]),
    ("ko", ["일", "시간", "분", "초"]),
    ("lt", ["dienos", "valandos", "minutės", "sekundės"]),
    ("nl", ["dagen", "uren", "minuten", "seconden"]),
    ("no", ["dager", "timer", "minutter", "sekunder"]),
    ("pl", ["dni", "godziny", "minuty", "sekundy"]),
    ("pt", ["dias", "horas", "minutos", "segundos"]),
    ("ro", ["zile", "ore", "minute", "secunde"]),
    ("ru", ["дни", "часы", "минуты", "секунды"]),
    ("sk", ["dni", "hodiny", "minúty", "sekundy"]),
    ("sv", ["dagar", "timmar", "minuter", "sekunder"]),
    ("th", ["วัน", "ชั่วโมง", "นาที", "วินาที"]),
    ("tr", ["gün", "saat", "dakika", "saniye"]),
    ("uk", ["дні", "години", "хвилини", "секунди"]),
    ("vi", ["ngày", "giờ", "phút", "giây"]),
    ("zh", ["天", "小时", "分钟", "秒"]),
];

static TRANSLATIONS: OnceLock<HashMap<&'static str, Labels>> = OnceLock::new();

fn translations() -> &'static HashMap<&'static str, Labels> {
    TRANSLATIONS.get_or_init(|| TABLE.iter().copied().collect())
}

/// Translate a unit key for a language code, falling back to the key itself.
pub fn translate<'a>(lang: &str, key: &'a str) -> &'a str {
    let Some(labels) = translations().get(lang) else {
        return key;
    };
    match KEYS.iter().position(|k| *k == key) {
        Some(i) => labels[i],
        None => key,
    }
}

/// Language codes with a translation.
pub fn languages() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|(code, _)| *code)
}
