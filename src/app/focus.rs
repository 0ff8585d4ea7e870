/// Which control of the create form receives keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Name,
    Distro,
    CreateButton,
    ListButton,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Name => Focus::Distro,
            Focus::Distro => Focus::CreateButton,
            Focus::CreateButton => Focus::ListButton,
            Focus::ListButton => Focus::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Name => Focus::ListButton,
            Focus::Distro => Focus::Name,
            Focus::CreateButton => Focus::Distro,
            Focus::ListButton => Focus::CreateButton,
        }
    }

    pub fn accepts_text(self) -> bool {
        self == Focus::Name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycle_round_trips() {
        let mut focus = Focus::default();
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Name);
        assert_eq!(Focus::Name.prev(), Focus::ListButton);
        assert_eq!(Focus::ListButton.next().next(), Focus::Distro);
    }
}
