use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Languages every post is written in
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lang {
    En,
    Es,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Es];

    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.md", self.code())
    }

    /// The other language of a translation pair
    pub fn counterpart(&self) -> Lang {
        match self {
            Lang::En => Lang::Es,
            Lang::Es => Lang::En,
        }
    }

    pub fn placeholder_body(&self) -> &'static str {
        match self {
            Lang::En => "Write your article here.",
            Lang::Es => "Escribe tu artículo aquí.",
        }
    }
}

impl Display for Lang {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Lang::En),
            "es" => Ok(Lang::Es),
            _ => Err(format!("Unknown language {}", s)),
        }
    }
}
