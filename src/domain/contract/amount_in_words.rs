//! Brazilian Portuguese spelling of a whole amount of reais, as printed
//! next to the numeric price in the contract body.

const UNITS: [&str; 10] = [
    "", "um", "dois", "três", "quatro", "cinco", "seis", "sete", "oito", "nove",
];

const TEENS: [&str; 10] = [
    "dez", "onze", "doze", "treze", "quatorze", "quinze", "dezesseis", "dezessete", "dezoito",
    "dezenove",
];

const TENS: [&str; 10] = [
    "", "", "vinte", "trinta", "quarenta", "cinquenta", "sessenta", "setenta", "oitenta",
    "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "cento",
    "duzentos",
    "trezentos",
    "quatrocentos",
    "quinhentos",
    "seiscentos",
    "setecentos",
    "oitocentos",
    "novecentos",
];

/// Scales above a thousand: value, singular, plural.
const SCALES: [(u64, &str, &str); 2] = [
    (1_000_000_000, "bilhão", "bilhões"),
    (1_000_000, "milhão", "milhões"),
];

/// Spells `reais` with its currency word.
///
/// `0` is `zero reais`, `1` is `um real`, and round millions take
/// `de reais` (`um milhão de reais`).
pub fn amount_in_words(reais: u64) -> String {
    match reais {
        0 => "zero reais".to_string(),
        1 => "um real".to_string(),
        n if n % 1_000_000 == 0 => format!("{} de reais", number_words(n)),
        n => format!("{} reais", number_words(n)),
    }
}

fn number_words(n: u64) -> String {
    for (scale, singular, plural) in SCALES {
        if n >= scale {
            let count = n / scale;
            let head = if count == 1 {
                format!("um {}", singular)
            } else {
                format!("{} {}", number_words(count), plural)
            };
            return join_rest(head, n % scale);
        }
    }

    if n >= 1000 {
        let count = n / 1000;
        let head = if count == 1 {
            "mil".to_string()
        } else {
            format!("{} mil", number_words(count))
        };
        return join_rest(head, n % 1000);
    }

    below_thousand(n)
}

// Remainders under a hundred are joined with "e": "mil e cinquenta".
fn join_rest(head: String, rest: u64) -> String {
    match rest {
        0 => head,
        r if r < 100 => format!("{} e {}", head, number_words(r)),
        r => format!("{} {}", head, number_words(r)),
    }
}

fn below_thousand(n: u64) -> String {
    if n == 100 {
        return "cem".to_string();
    }

    let n = n as usize;
    let (hundreds, rest) = (n / 100, n % 100);
    let mut parts = Vec::with_capacity(3);
    if hundreds > 0 {
        parts.push(HUNDREDS[hundreds]);
    }
    match rest {
        0 => {}
        1..=9 => parts.push(UNITS[rest]),
        10..=19 => parts.push(TEENS[rest - 10]),
        _ => {
            parts.push(TENS[rest / 10]);
            if rest % 10 > 0 {
                parts.push(UNITS[rest % 10]);
            }
        }
    }
    parts.join(" e ")
}
