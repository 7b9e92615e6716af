//! Named ARGB colors for marks and ranges.

pub const RED: u32 = 0xffff0000;
pub const GREEN: u32 = 0xff00ff00;
pub const BLUE: u32 = 0xff0000ff;
pub const YELLOW: u32 = 0xffffff00;
pub const MAGENTA: u32 = 0xffff00ff;
pub const CYAN: u32 = 0xff00ffff;
pub const WHITE: u32 = 0xffffffff;
pub const BLACK: u32 = 0xff000000;

/// Every named color, in declaration order.
pub const ALL: [(&str, u32); 8] = [
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("magenta", MAGENTA),
    ("cyan", CYAN),
    ("white", WHITE),
    ("black", BLACK),
];

/// Look up a color by its lowercase name.
pub fn by_name(name: &str) -> Option<u32> {
    ALL.iter().find(|(n, _)| *n == name).map(|&(_, argb)| argb)
}
