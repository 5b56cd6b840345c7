//! Typed fields: decorations over a single tag value, built on demand from the raw string.
//!
//! Each field type knows its tag name and a [`Layout`] that splits the value into
//! components and joins them back. MT5xx fields are mostly *generic fields*
//! (`:QUAL/[DSS]/data`): component 0 is the qualifier, component 1 the optional data source
//! scheme, and the remaining components are the data parts. A value missing either slash
//! after the qualifier has no qualifier and is kept whole in the data parts, so joining the
//! components always gives back the original value.
//!
//! Only the component split is modelled; the per-option value grammar (charsets, lengths,
//! code lists) is not checked.

use crate::tag::Tag;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// How a tag value splits into components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// The whole value is one component.
    Single,
    /// `:QUAL/[DSS]/p1/p2...`; the last of `parts` data parts takes the remainder.
    Generic { parts: usize },
    /// `:QUAL/[DSS]/` followed by free text (possibly multi-line).
    GenericText,
    /// `a/b/...` with no qualifier; the last of `parts` takes the remainder.
    Slashed { parts: usize },
    /// One component per line.
    Lines,
}

impl Layout {
    pub fn split(&self, value: &str) -> Vec<Option<String>> {
        match *self {
            Layout::Single => vec![Some(value.to_string())],
            Layout::Generic { parts } => {
                let (qualifier, dss, rest) = split_generic(value);
                let mut out = vec![qualifier, dss];
                out.extend(split_parts(rest, parts));
                out
            }
            Layout::GenericText => {
                let (qualifier, dss, rest) = split_generic(value);
                vec![qualifier, dss, Some(rest.to_string())]
            }
            Layout::Slashed { parts } => split_parts(value, parts),
            Layout::Lines => value.split("\r\n").map(|l| Some(l.to_string())).collect(),
        }
    }

    pub fn join(&self, components: &[Option<String>]) -> String {
        match *self {
            Layout::Single => components
                .first()
                .and_then(|c| c.clone())
                .unwrap_or_default(),
            Layout::Generic { .. } | Layout::GenericText => {
                let get = |i: usize| components.get(i).and_then(|c| c.as_deref());
                let mut out = String::new();
                if let Some(q) = get(0) {
                    out.push(':');
                    out.push_str(q);
                    out.push('/');
                    out.push_str(get(1).unwrap_or(""));
                    out.push('/');
                }
                out.push_str(&join_present(components.get(2..).unwrap_or(&[]), "/"));
                out
            }
            Layout::Slashed { .. } => join_present(components, "/"),
            Layout::Lines => join_present(components, "\r\n"),
        }
    }
}

/// `:QUAL/DSS/rest` -> (QUAL, DSS, rest). Anything else has no qualifier.
fn split_generic(value: &str) -> (Option<String>, Option<String>, &str) {
    let head = value.strip_prefix(':').and_then(|body| {
        let (qualifier, after) = body.split_once('/')?;
        let (dss, rest) = after.split_once('/')?;
        Some((qualifier, dss, rest))
    });
    match head {
        Some((qualifier, dss, rest)) => {
            let dss = if dss.is_empty() { None } else { Some(dss.to_string()) };
            (Some(qualifier.to_string()), dss, rest)
        }
        None => (None, None, value),
    }
}

fn split_parts(rest: &str, parts: usize) -> Vec<Option<String>> {
    let mut out: Vec<Option<String>> = rest.splitn(parts.max(1), '/').map(|s| Some(s.to_string())).collect();
    if rest.is_empty() {
        out.clear();
    }
    out.resize(parts.max(1), None);
    out
}

/// Present components up to the first missing one, joined by `sep`.
fn join_present(components: &[Option<String>], sep: &str) -> String {
    components
        .iter()
        .map_while(|c| c.as_deref())
        .collect::<Vec<_>>()
        .join(sep)
}

/// SWIFT decimal (`1234,56`, `100,`) to [`Decimal`].
pub fn parse_swift_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let mut normalized = s.replace(',', ".");
    if normalized.ends_with('.') {
        normalized.push('0');
    }
    Decimal::from_str(&normalized).ok()
}

/// Strips the `N` negative-sign prefix: (`negative`, remainder).
fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('N') {
        Some(rest) => (true, rest),
        None => (false, s),
    }
}

fn signed(negative: bool, d: Decimal) -> Decimal {
    if negative {
        -d
    } else {
        d
    }
}

/// A typed view over one tag value.
pub trait Field: Sized {
    /// Tag name, e.g. `"98A"`.
    const NAME: &'static str;
    const LAYOUT: Layout;

    fn from_components(components: Vec<Option<String>>) -> Self;
    fn components(&self) -> &[Option<String>];

    fn parse(value: &str) -> Self {
        Self::from_components(Self::LAYOUT.split(value))
    }

    /// Typed field for `tag` if the tag name matches.
    fn from_tag(tag: &Tag) -> Option<Self> {
        if tag.name == Self::NAME {
            Some(Self::parse(&tag.value))
        } else {
            None
        }
    }

    /// Raw value rebuilt from the components.
    fn value(&self) -> String {
        Self::LAYOUT.join(self.components())
    }

    fn to_tag(&self) -> Tag {
        Tag::new(Self::NAME, self.value())
    }

    fn component(&self, index: usize) -> Option<&str> {
        self.components().get(index)?.as_deref()
    }

    /// Qualifier of a generic field.
    fn qualifier(&self) -> Option<&str> {
        match Self::LAYOUT {
            Layout::Generic { .. } | Layout::GenericText => self.component(0),
            _ => None,
        }
    }

    /// Data source scheme of a generic field (`:QUAL/DSS/...`).
    fn data_source_scheme(&self) -> Option<&str> {
        match Self::LAYOUT {
            Layout::Generic { .. } | Layout::GenericText => self.component(1),
            _ => None,
        }
    }
}

macro_rules! field {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $layout:expr, { $($getter:ident = $idx:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $ty {
            components: Vec<Option<String>>,
        }

        impl $ty {
            pub fn new(value: &str) -> Self {
                <Self as Field>::parse(value)
            }

            $(
                pub fn $getter(&self) -> Option<&str> {
                    self.component($idx)
                }
            )*
        }

        impl Field for $ty {
            const NAME: &'static str = $name;
            const LAYOUT: Layout = $layout;

            fn from_components(components: Vec<Option<String>>) -> Self {
                $ty { components }
            }

            fn components(&self) -> &[Option<String>] {
                &self.components
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, ":{}:{}", $name, self.value())
            }
        }
    };
}

field!(
    /// Currency: `:4!c//3!a`.
    Field11A, "11A", Layout::Generic { parts: 1 }, { currency = 2 });
field!(
    /// Type of financial instrument: `:4!c/[8c]/30x`.
    Field12A, "12A", Layout::Generic { parts: 1 }, { instrument_code = 2 });
field!(
    /// Number identification: `:4!c//3!c`.
    Field13A, "13A", Layout::Generic { parts: 1 }, { number_id = 2 });
field!(
    /// Number identification: `:4!c/[8c]/30x`.
    Field13B, "13B", Layout::Generic { parts: 1 }, { number = 2 });
field!(
    /// Start of block.
    Field16R, "16R", Layout::Single, { block_name = 0 });
field!(
    /// End of block.
    Field16S, "16S", Layout::Single, { block_name = 0 });
field!(
    /// Flag: `:4!c//1!a`.
    Field17B, "17B", Layout::Generic { parts: 1 }, { flag = 2 });
field!(
    /// Amount: `:4!c//[N]3!a15d`.
    Field19A, "19A", Layout::Generic { parts: 1 }, { raw_amount = 2 });
field!(
    /// Amount: `:4!c/[8c]/3!a15d`.
    Field19B, "19B", Layout::Generic { parts: 1 }, { raw_amount = 2 });
field!(
    /// Reference: `:4!c//16x`.
    Field20C, "20C", Layout::Generic { parts: 1 }, { reference = 2 });
field!(
    /// Indicator: `:4!c/[8c]/4!c`.
    Field22F, "22F", Layout::Generic { parts: 1 }, { indicator = 2 });
field!(
    /// Indicator: `:4!c//4!c`.
    Field22H, "22H", Layout::Generic { parts: 1 }, { indicator = 2 });
field!(
    /// Function of the message: `4!c[/4!c]`.
    Field23G, "23G", Layout::Slashed { parts: 2 }, { function = 0, subfunction = 1 });
field!(
    /// Status code: `:4!c/[8c]/4!c`.
    Field25D, "25D", Layout::Generic { parts: 1 }, { status_code = 2 });
field!(
    /// Page number / continuation indicator: `5n/4!c`.
    Field28E, "28E", Layout::Slashed { parts: 2 }, { page_number = 0, continuation = 1 });
field!(
    /// Identification of the financial instrument: `[ISIN1!e12!c][4*35x]`.
    Field35B, "35B", Layout::Lines, {});
field!(
    /// Quantity of financial instrument: `:4!c//4!c/15d`.
    Field36B, "36B", Layout::Generic { parts: 2 }, { quantity_type = 2, raw_quantity = 3 });
field!(
    /// Period: `:4!c//8!n/8!n`.
    Field69A, "69A", Layout::Generic { parts: 2 }, { raw_start = 2, raw_end = 3 });
field!(
    /// Narrative: `:4!c//4*35x`.
    Field70C, "70C", Layout::GenericText, { narrative = 2 });
field!(
    /// Narrative: `:4!c//10*35x`.
    Field70E, "70E", Layout::GenericText, { narrative = 2 });
field!(
    /// Price: `:4!c//4!c/[N]15d`.
    Field90A, "90A", Layout::Generic { parts: 2 }, { percentage_type = 2, raw_price = 3 });
field!(
    /// Price: `:4!c//4!c/[N]3!a15d`.
    Field90B, "90B", Layout::Generic { parts: 2 }, { amount_type = 2, raw_price = 3 });
field!(
    /// Rate: `:4!c//[N]15d`.
    Field92A, "92A", Layout::Generic { parts: 1 }, { raw_rate = 2 });
field!(
    /// Balance: `:4!c/[8c]/4!c/[N]15d`.
    Field93B, "93B", Layout::Generic { parts: 2 }, { quantity_type = 2, raw_balance = 3 });
field!(
    /// Place: `:4!c/[8c]/4!c[/30x]`.
    Field94B, "94B", Layout::Generic { parts: 2 }, { place_code = 2, narrative = 3 });
field!(
    /// Party by BIC: `:4!c//4!a2!a2!c[3!c]`.
    Field95P, "95P", Layout::Generic { parts: 1 }, { bic = 2 });
field!(
    /// Party by name and address: `:4!c//4*35x`.
    Field95Q, "95Q", Layout::GenericText, { name_and_address = 2 });
field!(
    /// Party by proprietary code: `:4!c/8c/34x`.
    Field95R, "95R", Layout::Generic { parts: 1 }, { proprietary_code = 2 });
field!(
    /// Account: `:4!c//35x`.
    Field97A, "97A", Layout::Generic { parts: 1 }, { account = 2 });
field!(
    /// Date: `:4!c//8!n`.
    Field98A, "98A", Layout::Generic { parts: 1 }, { raw_date = 2 });
field!(
    /// Date and time: `:4!c//8!n6!n`.
    Field98C, "98C", Layout::Generic { parts: 1 }, { raw_date_time = 2 });
field!(
    /// Number count: `:4!c//[N]3!n`.
    Field99A, "99A", Layout::Generic { parts: 1 }, { raw_number = 2 });

/// `[N]3!a15d` -> (negative, currency, amount).
fn currency_amount(raw: &str) -> Option<(bool, &str, Decimal)> {
    let (negative, rest) = split_sign(raw);
    if rest.len() < 4 || !rest.is_char_boundary(3) {
        return None;
    }
    let (ccy, amount) = rest.split_at(3);
    Some((negative, ccy, parse_swift_decimal(amount)?))
}

impl Field19A {
    pub fn currency(&self) -> Option<&str> {
        self.raw_amount().and_then(currency_amount).map(|(_, c, _)| c)
    }

    /// Signed amount (`N` prefix means negative).
    pub fn amount(&self) -> Option<Decimal> {
        self.raw_amount()
            .and_then(currency_amount)
            .map(|(n, _, a)| signed(n, a))
    }
}

impl Field19B {
    pub fn currency(&self) -> Option<&str> {
        self.raw_amount().and_then(currency_amount).map(|(_, c, _)| c)
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.raw_amount()
            .and_then(currency_amount)
            .map(|(n, _, a)| signed(n, a))
    }
}

impl Field35B {
    /// ISIN from a first line of the form `ISIN XX0000000000`.
    pub fn isin(&self) -> Option<&str> {
        self.component(0)?.strip_prefix("ISIN ").map(str::trim)
    }

    /// Description lines (everything except the ISIN line).
    pub fn description(&self) -> Vec<&str> {
        let skip = usize::from(self.isin().is_some());
        self.components
            .iter()
            .skip(skip)
            .filter_map(|c| c.as_deref())
            .filter(|l| !l.is_empty())
            .collect()
    }
}

impl Field36B {
    pub fn quantity(&self) -> Option<Decimal> {
        self.raw_quantity().and_then(parse_swift_decimal)
    }
}

impl Field69A {
    /// (start, end) of the period.
    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(self.raw_start()?, "%Y%m%d").ok()?;
        let end = NaiveDate::parse_from_str(self.raw_end()?, "%Y%m%d").ok()?;
        Some((start, end))
    }
}

impl Field70E {
    pub fn lines(&self) -> Vec<&str> {
        self.narrative().map(|n| n.lines().collect()).unwrap_or_default()
    }
}

impl Field90A {
    pub fn price(&self) -> Option<Decimal> {
        let (negative, rest) = split_sign(self.raw_price()?);
        parse_swift_decimal(rest).map(|d| signed(negative, d))
    }
}

impl Field90B {
    pub fn currency(&self) -> Option<&str> {
        self.raw_price().and_then(currency_amount).map(|(_, c, _)| c)
    }

    pub fn price(&self) -> Option<Decimal> {
        self.raw_price()
            .and_then(currency_amount)
            .map(|(n, _, a)| signed(n, a))
    }
}

impl Field92A {
    pub fn rate(&self) -> Option<Decimal> {
        let (negative, rest) = split_sign(self.raw_rate()?);
        parse_swift_decimal(rest).map(|d| signed(negative, d))
    }
}

impl Field93B {
    pub fn balance(&self) -> Option<Decimal> {
        let (negative, rest) = split_sign(self.raw_balance()?);
        parse_swift_decimal(rest).map(|d| signed(negative, d))
    }
}

impl Field98A {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.raw_date()?, "%Y%m%d").ok()
    }
}

impl Field98C {
    pub fn date_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.raw_date_time()?, "%Y%m%d%H%M%S").ok()
    }
}

impl Field99A {
    pub fn number(&self) -> Option<i64> {
        let (negative, rest) = split_sign(self.raw_number()?);
        let n: i64 = rest.parse().ok()?;
        Some(if negative { -n } else { n })
    }
}
