use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Wallet,
    TrendingUp,
    CreditCard,
    Target,
    Plus,
}

impl Icon {
    fn path(self) -> &'static str {
        match self {
            Icon::Wallet => "M3 7h18v10H3zM16 7V5H5v2",
            Icon::TrendingUp => "M3 17l6-6 4 4 7-7",
            Icon::CreditCard => "M3 7h18v10H3zM3 11h18",
            Icon::Target => "M12 12m-9 0a9 9 0 1018 0 9 9 0 10-18 0M12 12m-4 0a4 4 0 108 0 4 4 0 10-8 0",
            Icon::Plus => "M12 5v14M5 12h14",
        }
    }
}

/// Stroke icon inheriting the surrounding text colour.
pub fn icon(kind: Icon, size: u32) -> Html {
    html! {
        <svg width={size.to_string()} height={size.to_string()} viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
            <path d={kind.path()}></path>
        </svg>
    }
}
