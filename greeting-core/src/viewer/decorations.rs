/// Decorative images placed around the cake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    BalloonLeft,
    BalloonRight,
    ConfettiLeft,
    ConfettiRight,
    Ribbon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub src: &'static str,
    /// Entrance animation delay
    pub delay_ms: u32,
}

impl Decoration {
    /// Ribbons hang over the page, everything else sits on the cake
    pub fn is_ribbon(&self) -> bool {
        self.kind == DecorationKind::Ribbon
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            DecorationKind::BalloonLeft => "decoration balloon-left",
            DecorationKind::BalloonRight => "decoration balloon-right",
            DecorationKind::ConfettiLeft => "decoration confetti-left",
            DecorationKind::ConfettiRight => "decoration confetti-right",
            DecorationKind::Ribbon => "decoration ribbon",
        }
    }
}

/// The fixed set applied by the "decorate" action
pub const DECORATIONS: [Decoration; 5] = [
    Decoration {
        kind: DecorationKind::BalloonLeft,
        src: "/decorations/left_balloon-removebg-preview.png",
        delay_ms: 0,
    },
    Decoration {
        kind: DecorationKind::BalloonRight,
        src: "/decorations/right_balloon-removebg-preview.png",
        delay_ms: 100,
    },
    Decoration {
        kind: DecorationKind::ConfettiLeft,
        src: "/decorations/confetti.gif",
        delay_ms: 200,
    },
    Decoration {
        kind: DecorationKind::ConfettiRight,
        src: "/decorations/confetti.gif",
        delay_ms: 300,
    },
    Decoration {
        kind: DecorationKind::Ribbon,
        src: "/decorations/ribbon.png",
        delay_ms: 400,
    },
];

/// Phrase hidden behind the balloons; balloon `i` reveals word `i`
pub const PHRASE: [&str; 4] = ["You", "are", "a", "Cutiee"];

/// Delay between the entrance of consecutive phrase words
pub const WORD_STAGGER_MS: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decorations_use_deployed_artwork() {
        let srcs: Vec<&str> = DECORATIONS.iter().map(|d| d.src).collect();
        assert_eq!(
            srcs,
            [
                "/decorations/left_balloon-removebg-preview.png",
                "/decorations/right_balloon-removebg-preview.png",
                "/decorations/confetti.gif",
                "/decorations/confetti.gif",
                "/decorations/ribbon.png",
            ]
        );
        assert_eq!(DECORATIONS.iter().filter(|d| d.is_ribbon()).count(), 1);
    }
}
