use dioxus::prelude::*;

/// Header, footer and document title around every page.
#[component]
pub fn SiteFrame(on_home: EventHandler<()>, children: Element) -> Element {
    let go_home = move |event: MouseEvent| {
        event.prevent_default();
        on_home.call(());
    };

    rsx! {
        document::Title { {crate::t!("site-title")} }
        header { class: "site-header",
            a { class: "site-header__brand", href: "/", onclick: go_home, {crate::t!("site-title")} }
            span { class: "site-header__tagline", {crate::t!("site-tagline")} }
            nav { class: "site-header__nav",
                a { class: "site-header__link", href: "/", onclick: go_home, {crate::t!("nav-home")} }
                a { class: "site-header__link", href: "/contact", {crate::t!("nav-contact")} }
            }
        }
        main { class: "site-main", {children} }
        footer { class: "site-footer", {crate::t!("footer-note")} }
    }
}
