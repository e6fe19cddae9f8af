//! Config files embedded at compile time from `configs/`.

/// An embedded text file and its path relative to `configs/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub path: &'static str,
    pub contents: &'static str,
}

macro_rules! asset {
    ($path:literal) => {
        Asset {
            path: $path,
            contents: include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/configs/", $path)),
        }
    };
}

pub const SSH_CONFIG: Asset = asset!("ssh/config");

pub const GITCONFIG: Asset = asset!("git/.gitconfig");
pub const GITIGNORE_GLOBAL: Asset = asset!("git/.gitignore_global");

pub const CAPSLOCK_PLIST: Asset = asset!("macos/com.henrikkvamme.capslock-escape.plist");

pub const FISH_CONFIG: Asset = asset!("fish/config.fish");
pub const FISH_FUNCTIONS: &[(&str, Asset)] = &[
    ("y.fish", asset!("fish/functions/y.fish")),
    ("b.fish", asset!("fish/functions/b.fish")),
    ("fuck.fish", asset!("fish/functions/fuck.fish")),
    ("_fzf_compgen_path.fish", asset!("fish/functions/_fzf_compgen_path.fish")),
    ("_fzf_compgen_dir.fish", asset!("fish/functions/_fzf_compgen_dir.fish")),
];

pub const STARSHIP: Asset = asset!("starship/starship.toml");

pub const GHOSTTY: Asset = asset!("ghostty/config");

/// LazyVim tree, relative to `~/.config/nvim`.
pub const NVIM: &[(&str, Asset)] = &[
    ("init.lua", asset!("nvim/init.lua")),
    ("stylua.toml", asset!("nvim/stylua.toml")),
    (".neoconf.json", asset!("nvim/.neoconf.json")),
    ("lua/config/lazy.lua", asset!("nvim/lua/config/lazy.lua")),
    ("lua/config/options.lua", asset!("nvim/lua/config/options.lua")),
    ("lua/config/keymaps.lua", asset!("nvim/lua/config/keymaps.lua")),
    ("lua/config/autocmds.lua", asset!("nvim/lua/config/autocmds.lua")),
    ("lua/plugins/init.lua", asset!("nvim/lua/plugins/init.lua")),
];

/// Relative to `~/.claude`.
pub const CLAUDE_FILES: &[(&str, Asset)] = &[
    ("CLAUDE.md", asset!("claude/CLAUDE.md")),
    ("settings.json", asset!("claude/settings.json")),
    (".mcp.json", asset!("claude/.mcp.json")),
    ("statusline-command.sh", asset!("claude/statusline-command.sh")),
    ("statusline-fish.fish", asset!("claude/statusline-fish.fish")),
];

/// Relative to `~/.claude/hooks`; installed executable.
pub const CLAUDE_HOOKS: &[(&str, Asset)] = &[
    ("ts_typecheck.py", asset!("claude/hooks/ts_typecheck.py")),
    ("play_audio.py", asset!("claude/hooks/play_audio.py")),
    ("macos_notification.py", asset!("claude/hooks/macos_notification.py")),
];

pub const VSCODE_SETTINGS: Asset = asset!("vscode/settings.json");
pub const VSCODE_NVIM_INIT: Asset = asset!("vscode/init.vim");
