//! Menu router — the stateless state machine behind the services menu.
//!
//! The menu is a fixed two-level tree: a root list of services and three
//! sibling submenus. No per-sender conversation state exists, so the next
//! menu is a pure function of the inbound event; redelivered webhook events
//! simply recompute and resend the same message.

use crate::webhook::event::EventKind;

/// A single selectable row in an interactive list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuRow {
    pub id: &'static str,
    pub title: &'static str,
}

/// A complete interactive list menu, fully determined at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuList {
    pub header: &'static str,
    pub body: &'static str,
    pub button: &'static str,
    pub section_title: &'static str,
    pub rows: &'static [MenuRow],
}

/// Confirmation text for menu leaves that have no service behind them yet.
pub const COMING_SOON: &str = "השירות יתווסף בקרוב:)";

/// Root menu selection ids. These are echoed back by the provider in
/// list/button replies and must stay stable.
pub const ID_LAUNDRY: &str = "laundry";
pub const ID_CLASS_RESERVATION: &str = "class_reservation";
pub const ID_DOCTOR_APPOINTMENT: &str = "doctor_appointment";

static ROOT_MENU: MenuList = MenuList {
    header: "תפריט שירותים",
    body: "בחר סוג שירות:",
    button: "רשימת שירותים",
    section_title: "שירותים זמינים",
    rows: &[
        MenuRow { id: ID_LAUNDRY, title: "כביסה" },
        MenuRow { id: ID_CLASS_RESERVATION, title: "שריון כיתה" },
        MenuRow { id: ID_DOCTOR_APPOINTMENT, title: "תור לרופא" },
    ],
};

static LAUNDRY_MENU: MenuList = MenuList {
    header: "כביסה",
    body: "בחר פעולה: (לחזרה השב חזור)",
    button: "שירותי כביסה",
    section_title: "שירותי כביסה",
    rows: &[
        MenuRow { id: "laundry_reserve", title: "שריון שעה" },
        MenuRow { id: "laundry_finished", title: "סיום" },
        MenuRow { id: "laundry_delay", title: "דחייה" },
    ],
};

static CLASS_MENU: MenuList = MenuList {
    header: "שיריון כיתה",
    body: "בחר סוג כיתה: (לחזרה השב חזור)",
    button: "סוגי כיתות",
    section_title: "סוגי כיתות",
    rows: &[
        MenuRow { id: "class_small", title: "כיתה קטנה'" },
        MenuRow { id: "class_big", title: "כיתה גדולה" },
        MenuRow { id: "class_auditorium", title: "אודיטוריום" },
    ],
};

static DOCTOR_MENU: MenuList = MenuList {
    header: "תור לרופא",
    body: "בחר רופא:  (לחזרה השב חזור)",
    button: "רשימת רופאים",
    section_title: "רופאין זמינים",
    rows: &[
        MenuRow { id: "doctor_almog", title: "ד\"ר אלמוג" },
        MenuRow { id: "doctor_daniel", title: "ד\"ר דניאל" },
        MenuRow { id: "doctor_sus", title: "ד\"ר סוס" },
    ],
};

/// A node in the menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuNode {
    Root,
    Laundry,
    ClassReservation,
    Doctor,
    /// Terminal acknowledgment — rendered as plain text, no further options.
    Leaf,
}

/// What gets sent back to the user for a given node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuReply {
    List(&'static MenuList),
    Text(&'static str),
}

impl MenuNode {
    /// Map a selection id to the next node.
    ///
    /// Only the three root ids open submenus. Everything else — submenu leaf
    /// ids and ids we never issued alike — is a defined transition to
    /// [`MenuNode::Leaf`], not a lookup failure: with no conversation state
    /// the two cases are indistinguishable.
    pub fn for_selection(id: &str) -> MenuNode {
        match id {
            ID_LAUNDRY => MenuNode::Laundry,
            ID_CLASS_RESERVATION => MenuNode::ClassReservation,
            ID_DOCTOR_APPOINTMENT => MenuNode::Doctor,
            _ => MenuNode::Leaf,
        }
    }

    /// The outbound message this node renders to.
    pub fn reply(&self) -> MenuReply {
        match self {
            MenuNode::Root => MenuReply::List(&ROOT_MENU),
            MenuNode::Laundry => MenuReply::List(&LAUNDRY_MENU),
            MenuNode::ClassReservation => MenuReply::List(&CLASS_MENU),
            MenuNode::Doctor => MenuReply::List(&DOCTOR_MENU),
            MenuNode::Leaf => MenuReply::Text(COMING_SOON),
        }
    }
}

/// Decide the next menu node for an inbound event.
///
/// Free text always resets to the root menu — there is no stored context a
/// text reply could be relative to. Interactive replies route by their
/// selection id. Anything else produces no outbound message.
pub fn route(kind: &EventKind) -> Option<MenuNode> {
    match kind {
        EventKind::Text => Some(MenuNode::Root),
        EventKind::ListReply { id } | EventKind::ButtonReply { id } => {
            Some(MenuNode::for_selection(id))
        }
        EventKind::Other => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_always_routes_to_root() {
        assert_eq!(route(&EventKind::Text), Some(MenuNode::Root));
    }

    #[test]
    fn root_ids_open_their_submenus() {
        for (id, node) in [
            ("laundry", MenuNode::Laundry),
            ("class_reservation", MenuNode::ClassReservation),
            ("doctor_appointment", MenuNode::Doctor),
        ] {
            assert_eq!(route(&EventKind::ListReply { id: id.into() }), Some(node));
            assert_eq!(route(&EventKind::ButtonReply { id: id.into() }), Some(node));
        }
    }

    #[test]
    fn submenu_leaf_ids_route_to_leaf() {
        for id in [
            "laundry_reserve",
            "laundry_finished",
            "laundry_delay",
            "class_small",
            "class_big",
            "class_auditorium",
            "doctor_almog",
            "doctor_daniel",
            "doctor_sus",
        ] {
            assert_eq!(
                route(&EventKind::ListReply { id: id.into() }),
                Some(MenuNode::Leaf),
                "id {id} should fall through to the leaf acknowledgment"
            );
        }
    }

    #[test]
    fn unknown_ids_route_to_leaf() {
        assert_eq!(
            route(&EventKind::ButtonReply { id: "no_such_service".into() }),
            Some(MenuNode::Leaf)
        );
        assert_eq!(
            route(&EventKind::ListReply { id: String::new() }),
            Some(MenuNode::Leaf)
        );
    }

    #[test]
    fn other_events_produce_no_menu() {
        assert_eq!(route(&EventKind::Other), None);
    }

    #[test]
    fn root_menu_rows_match_contract() {
        let MenuReply::List(menu) = MenuNode::Root.reply() else {
            panic!("root must render a list");
        };
        assert_eq!(menu.header, "תפריט שירותים");
        let ids: Vec<&str> = menu.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, ["laundry", "class_reservation", "doctor_appointment"]);
    }

    #[test]
    fn laundry_menu_rows_match_contract() {
        let MenuReply::List(menu) = MenuNode::Laundry.reply() else {
            panic!("laundry must render a list");
        };
        assert_eq!(menu.header, "כביסה");
        let ids: Vec<&str> = menu.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, ["laundry_reserve", "laundry_finished", "laundry_delay"]);
    }

    #[test]
    fn class_menu_rows_match_contract() {
        let MenuReply::List(menu) = MenuNode::ClassReservation.reply() else {
            panic!("class must render a list");
        };
        let ids: Vec<&str> = menu.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, ["class_small", "class_big", "class_auditorium"]);
    }

    #[test]
    fn doctor_menu_rows_match_contract() {
        let MenuReply::List(menu) = MenuNode::Doctor.reply() else {
            panic!("doctor must render a list");
        };
        let ids: Vec<&str> = menu.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, ["doctor_almog", "doctor_daniel", "doctor_sus"]);
    }

    #[test]
    fn leaf_renders_coming_soon_text() {
        assert_eq!(MenuNode::Leaf.reply(), MenuReply::Text("השירות יתווסף בקרוב:)"));
    }

    #[test]
    fn routing_is_deterministic_for_redelivery() {
        // The provider may redeliver an event; the same input must yield
        // the same menu.
        let kind = EventKind::ListReply { id: "laundry".into() };
        assert_eq!(route(&kind), route(&kind));
    }
}
