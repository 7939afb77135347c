use super::{HelpBook, HelpFlag, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "Brain Dump",
        usage: "dump <command> [args]",
        topics: ALL_TOPICS,
        footer: &[
            "Use `dump help <topic>` for focused docs, e.g. `dump help tag` or `dump help editor`.",
            "IDs are positions in `dump list`: 1 is always the newest entry.",
        ],
    }
}

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "new",
        summary: "Start today's next entry and open it in the outline editor.",
        usage: "dump new [tags...]",
        details: &[
            "Files are named YYYYMMDDNN.md where NN counts up from 01 for each entry written that day.",
            "Tags given here go straight into the frontmatter. Leaving the editor without typing anything deletes the new file again.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["dump new", "dump new health work"],
    },
    HelpTopic {
        name: "open",
        summary: "Edit an entry in the outline editor (default: newest).",
        usage: "dump open [id]",
        details: &[
            "Ctrl+N and Ctrl+P save the current entry and move to the next or previous one, wrapping at either end.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["dump open", "dump open 3"],
    },
    HelpTopic {
        name: "edit",
        summary: "Open an entry in $EDITOR (default: newest).",
        usage: "dump edit [id]",
        details: &["Falls back to nano when EDITOR is unset."],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["EDITOR=vim dump edit 2"],
    },
    HelpTopic {
        name: "list",
        summary: "Table of the newest entries with date, tags and status.",
        usage: "dump list [n]",
        details: &[
            "Shows 10 entries unless a count is given; the footer says how many were left out.",
        ],
        flags: &[],
        aliases: &["ls"],
        section: Section::Command,
        examples: &["dump list", "dump list 30"],
    },
    HelpTopic {
        name: "view",
        summary: "Print an entry to the terminal.",
        usage: "dump view <id> [--render|-r] [--plain]",
        details: &[
            "Without flags the file is printed as is. --render styles headings and bullets.",
        ],
        flags: &[
            HelpFlag {
                name: "--render, -r",
                desc: "Render markdown with outline glyphs and color.",
            },
            HelpFlag { name: "--plain", desc: "Disable color for this call." },
        ],
        aliases: &["show"],
        section: Section::Command,
        examples: &["dump view 1 --render"],
    },
    HelpTopic {
        name: "copy",
        summary: "Copy one or more entries to the clipboard (default: newest).",
        usage: "dump copy [ids...]",
        details: &[
            "Entries are joined with horizontal rules under a short intro line, and each frontmatter gains an `id` key so the source of every section stays clear.",
        ],
        flags: &[],
        aliases: &["cp"],
        section: Section::Command,
        examples: &["dump copy", "dump copy 1 3 6"],
    },
    HelpTopic {
        name: "tag",
        summary: "Add or remove tags on an entry.",
        usage: "dump tag <id> [add tags...] [remove tags...]",
        details: &[
            "Tags are stored lowercase. Words after `add` are added and words after `remove` are removed; both can appear in one call.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["dump tag 1 add health exercise remove fitness"],
    },
    HelpTopic {
        name: "synth",
        summary: "Toggle whether an entry has been synthesised.",
        usage: "dump synth <id>",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["dump synth 2"],
    },
    HelpTopic {
        name: "delete",
        summary: "Delete an entry.",
        usage: "dump delete <id>",
        details: &["The file is removed right away; there is no trash."],
        flags: &[],
        aliases: &["rm"],
        section: Section::Command,
        examples: &["dump delete 4"],
    },
    HelpTopic {
        name: "sync",
        summary: "Commit local entries and exchange them with the git remote.",
        usage: "dump sync",
        details: &[
            "Fetches, sets local edits aside while rebasing onto the remote, restores them, then commits everything as `Log: YYYY-MM-DD` and pushes.",
            "The journal directory must be a git repository with a remote.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["dump sync"],
    },
    HelpTopic {
        name: "pull",
        summary: "Pull remote entries without pushing.",
        usage: "dump pull",
        details: &["Refuses to run while there are uncommitted local changes."],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["dump pull"],
    },
    HelpTopic {
        name: "path",
        summary: "Print the journal directory.",
        usage: "dump path",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["cd \"$(dump path)\""],
    },
    HelpTopic {
        name: "help",
        summary: "Show this overview or help for one topic.",
        usage: "dump help [topic]",
        details: &[],
        flags: &[],
        aliases: &["--help", "-h"],
        section: Section::Command,
        examples: &["dump help open"],
    },
    HelpTopic {
        name: "editor",
        summary: "Keys in the full-screen outline editor.",
        usage: "dump help editor",
        details: &[
            "Every line is a bullet. Tab indents the current line (up to five levels) and Shift+Tab outdents it; the bullet glyph follows the level.",
            "Enter starts a new bullet at the same level. On an empty nested bullet it outdents instead. On an empty top-level bullet, press Enter twice to save and exit.",
            "Backspace right after a bullet joins the line onto the one above. Down on the last line adds a new bullet.",
            "Ctrl+S saves, Ctrl+X or Esc leaves without saving, Ctrl+N/Ctrl+P save and move between entries when opened with `dump open`.",
        ],
        flags: &[],
        aliases: &["keys"],
        section: Section::Guide,
        examples: &[],
    },
    HelpTopic {
        name: "BRAINDUMP_DIR",
        summary: "Override the journal directory (default ~/dumps).",
        usage: "BRAINDUMP_DIR=/path dump list",
        details: &["Directory is created on demand if it does not exist."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["BRAINDUMP_DIR=/tmp/journal dump new"],
    },
    HelpTopic {
        name: "BRAINDUMP_LOG",
        summary: "Log filter for diagnostics on stderr (default warn).",
        usage: "BRAINDUMP_LOG=debug dump sync",
        details: &["Accepts tracing filter directives such as `debug` or `braindump=trace`."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["BRAINDUMP_LOG=debug dump open"],
    },
    HelpTopic {
        name: "EDITOR",
        summary: "External editor used by `dump edit`.",
        usage: "EDITOR=vim dump edit",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "NO_COLOR",
        summary: "Disable colored output everywhere.",
        usage: "NO_COLOR=1 dump list",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["NO_COLOR=1 dump view 1 --render"],
    },
];
