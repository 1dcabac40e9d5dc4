//! Classification dimensions used as filter values.
//!
//! Regions, markets, sub-markets, countries and exchanges are closed sets.
//! Each constant carries the string the backend expects on the wire.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::filter::{EnumValue, FilterValue};
use crate::Error;

/// Classification set an enumerated field draws its values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// [`Region`]
    Region,
    /// [`Market`]
    Market,
    /// [`SubMarket`]
    SubMarket,
    /// [`Country`]
    Country,
    /// [`Exchange`]
    Exchange,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Region => "region",
            Dimension::Market => "market",
            Dimension::SubMarket => "sub-market",
            Dimension::Country => "country",
            Dimension::Exchange => "exchange",
        };
        f.write_str(name)
    }
}

macro_rules! classification {
    (
        $(#[$meta:meta])*
        $name:ident => $dimension:ident {
            $( $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("`", $wire, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Every constant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value sent to the backend.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        Error::InvalidInput(format!(
                            "unknown {} `{}`",
                            Dimension::$dimension,
                            s
                        ))
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl From<$name> for FilterValue {
            fn from(value: $name) -> Self {
                FilterValue::Enum(EnumValue::new(Dimension::$dimension, value.as_str()))
            }
        }
    };
}

classification! {
    /// Geographic region of a currency pair.
    Region => Region {
        Africa => "Africa",
        Americas => "Americas",
        Asia => "Asia",
        Europe => "Europe",
        MiddleEast => "Middle East",
        Pacific => "Pacific",
    }
}

classification! {
    /// Market (country-level venue group) scanned by the stock screener.
    Market => Market {
        America => "america",
        Argentina => "argentina",
        Australia => "australia",
        Brazil => "brazil",
        Canada => "canada",
        China => "china",
        France => "france",
        Germany => "germany",
        HongKong => "hongkong",
        India => "india",
        Italy => "italy",
        Japan => "japan",
        Korea => "korea",
        Mexico => "mexico",
        Netherlands => "netherlands",
        Spain => "spain",
        Switzerland => "switzerland",
        Uk => "uk",
    }
}

classification! {
    /// OTC tier of a US over-the-counter listing.
    SubMarket => SubMarket {
        Otcqx => "otcqx",
        Otcqb => "otcqb",
        Pink => "pink",
    }
}

classification! {
    /// Country of the issuer.
    Country => Country {
        Argentina => "Argentina",
        Australia => "Australia",
        Belgium => "Belgium",
        Bermuda => "Bermuda",
        Brazil => "Brazil",
        Canada => "Canada",
        CaymanIslands => "Cayman Islands",
        Chile => "Chile",
        China => "China",
        France => "France",
        Germany => "Germany",
        HongKong => "Hong Kong",
        India => "India",
        Ireland => "Ireland",
        Israel => "Israel",
        Italy => "Italy",
        Japan => "Japan",
        Luxembourg => "Luxembourg",
        Mexico => "Mexico",
        Netherlands => "Netherlands",
        Singapore => "Singapore",
        Spain => "Spain",
        Sweden => "Sweden",
        Switzerland => "Switzerland",
        Taiwan => "Taiwan",
        UnitedKingdom => "United Kingdom",
        UnitedStates => "United States",
    }
}

classification! {
    /// Listing exchange, as it appears in the symbol prefix.
    Exchange => Exchange {
        Nasdaq => "NASDAQ",
        Nyse => "NYSE",
        NyseArca => "AMEX",
        Otc => "OTC",
        Cboe => "CBOE",
        Bcba => "BCBA",
        BmfBovespa => "BMFBOVESPA",
        Tsx => "TSX",
        Tsxv => "TSXV",
        Lse => "LSE",
        Xetr => "XETR",
        Euronext => "EURONEXT",
        Six => "SIX",
        Bme => "BME",
        Mil => "MIL",
        Tse => "TSE",
        Hkex => "HKEX",
        Sse => "SSE",
        Szse => "SZSE",
        Nse => "NSE",
        Bse => "BSE",
        Asx => "ASX",
        Krx => "KRX",
    }
}

/// Kind of security, as a backend `type` plus an optional `typespecs` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolType {
    /// Common stock
    CommonStock,
    /// Preferred stock
    PreferredStock,
    /// Depositary receipt
    DepositaryReceipt,
    /// Exchange-traded fund
    Etf,
    /// Exchange-traded note
    Etn,
    /// Mutual fund
    MutualFund,
    /// Closed-end fund
    ClosedEndFund,
    /// Real estate investment trust
    Reit,
    /// Unit investment trust
    Unit,
    /// Structured product
    Structured,
}

impl SymbolType {
    /// Every symbol type, in declaration order.
    pub const ALL: &'static [SymbolType] = &[
        SymbolType::CommonStock,
        SymbolType::PreferredStock,
        SymbolType::DepositaryReceipt,
        SymbolType::Etf,
        SymbolType::Etn,
        SymbolType::MutualFund,
        SymbolType::ClosedEndFund,
        SymbolType::Reit,
        SymbolType::Unit,
        SymbolType::Structured,
    ];

    /// Value of the backend `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            SymbolType::CommonStock | SymbolType::PreferredStock => "stock",
            SymbolType::DepositaryReceipt => "dr",
            SymbolType::Etf
            | SymbolType::MutualFund
            | SymbolType::ClosedEndFund
            | SymbolType::Reit
            | SymbolType::Unit => "fund",
            SymbolType::Etn | SymbolType::Structured => "structured",
        }
    }

    /// Value required in the backend `typespecs` array, if any.
    pub fn typespec(&self) -> Option<&'static str> {
        match self {
            SymbolType::CommonStock => Some("common"),
            SymbolType::PreferredStock => Some("preferred"),
            SymbolType::DepositaryReceipt | SymbolType::Structured => None,
            SymbolType::Etf => Some("etf"),
            SymbolType::Etn => Some("etn"),
            SymbolType::MutualFund => Some("mutual"),
            SymbolType::ClosedEndFund => Some("closedend"),
            SymbolType::Reit => Some("reit"),
            SymbolType::Unit => Some("unit"),
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.typespec() {
            Some(spec) => write!(f, "{}/{}", self.kind(), spec),
            None => f.write_str(self.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(Exchange::NyseArca.as_str(), "AMEX");
        assert_eq!(Region::Africa.to_string(), "Africa");
        assert_eq!(Country::UnitedStates.as_str(), "United States");
        assert_eq!(
            serde_json::to_value(Market::Argentina).unwrap(),
            serde_json::json!("argentina")
        );
    }

    #[test]
    fn test_from_str_round_trips_wire_value() {
        assert_eq!("otcqb".parse::<SubMarket>().unwrap(), SubMarket::Otcqb);
        assert_eq!("Bermuda".parse::<Country>().unwrap(), Country::Bermuda);
        assert!("Atlantis".parse::<Country>().is_err());
    }

    #[test]
    fn test_enum_value_carries_dimension() {
        match FilterValue::from(Country::Argentina) {
            FilterValue::Enum(value) => {
                assert_eq!(value.dimension(), Dimension::Country);
                assert_eq!(value.as_str(), "Argentina");
            }
            other => panic!("Expected enum value, got {:?}", other),
        }
    }

    #[test]
    fn test_symbol_type_parts() {
        assert_eq!(SymbolType::CommonStock.kind(), "stock");
        assert_eq!(SymbolType::CommonStock.typespec(), Some("common"));
        assert_eq!(SymbolType::DepositaryReceipt.typespec(), None);
        assert_eq!(SymbolType::Etf.to_string(), "fund/etf");
    }
}
