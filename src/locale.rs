use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Id,
    En,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "id-id" | "indonesia" => Ok(Language::Id),
            "en" | "en-us" | "en-gb" | "english" => Ok(Language::En),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

impl Language {
    /// Reads the language selector, falling back to Indonesian.
    pub fn from_selector(selector: Option<&str>) -> Self {
        selector.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Id => "id",
            Language::En => "en",
        }
    }

    pub fn thousands_separator(&self) -> char {
        match self {
            Language::Id => '.',
            Language::En => ',',
        }
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Language::Id => &ID,
            Language::En => &EN,
        }
    }
}

#[derive(Debug)]
pub struct Strings {
    pub app_title: &'static str,
    pub greeting: &'static str,
    pub guest: &'static str,
    pub loading: &'static str,
    pub load_error: &'static str,
    pub period: &'static str,
    pub days: &'static str,
    pub total_in: &'static str,
    pub total_out: &'static str,
    pub balance: &'static str,
    pub no_summary: &'static str,
    pub logout: &'static str,
}

static ID: Strings = Strings {
    app_title: "Keuanganku",
    greeting: "Halo",
    guest: "Tamu",
    loading: "Memuat...",
    load_error: "Gagal memuat data",
    period: "Periode",
    days: "hari",
    total_in: "Pemasukan",
    total_out: "Pengeluaran",
    balance: "Saldo",
    no_summary: "Belum ada ringkasan",
    logout: "Keluar",
};

static EN: Strings = Strings {
    app_title: "Keuanganku",
    greeting: "Hello",
    guest: "Guest",
    loading: "Loading...",
    load_error: "Failed to load data",
    period: "Period",
    days: "days",
    total_in: "Income",
    total_out: "Expenses",
    balance: "Balance",
    no_summary: "No summary yet",
    logout: "Log out",
};
