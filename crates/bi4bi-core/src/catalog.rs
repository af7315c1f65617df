//! The fixed catalog of BI tools shown on the selection grid.

/// One entry on the tool-selection grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    /// Display name, also stored as `selected_tool` on transition.
    pub name: &'static str,
    /// Logo asset filename (presentation only).
    pub logo: &'static str,
    /// Lower-cased backend adapter identifier. `None` means the tool has
    /// no implemented adapter yet and selecting it raises a notice
    /// instead of opening the configuration form.
    pub adapter_key: Option<&'static str>,
}

/// Tool preselected when the Configure screen is entered without a
/// selection (e.g. via a `page=configure` deep link with no `tool`).
pub const DEFAULT_TOOL: &str = "Tableau";

/// All tools in grid order. Only Tableau has an adapter today.
pub static TOOLS: [Tool; 7] = [
    Tool {
        name: "MicroStrategy",
        logo: "strategy.png",
        adapter_key: None,
    },
    Tool {
        name: "Oracle OBIEE",
        logo: "oracleOBIEE.png",
        adapter_key: None,
    },
    Tool {
        name: "Cognos",
        logo: "cognos.png",
        adapter_key: None,
    },
    Tool {
        name: "Power BI",
        logo: "powerbi.png",
        adapter_key: None,
    },
    Tool {
        name: "SAP BusinessObjects",
        logo: "sap-bo.png",
        adapter_key: None,
    },
    Tool {
        name: "SQL Server",
        logo: "SSRS.png",
        adapter_key: None,
    },
    Tool {
        name: "Tableau",
        logo: "tableau.png",
        adapter_key: Some("tableau"),
    },
];

/// Look up a tool by display name or adapter key, case-insensitively.
/// Deep links may carry either form (`tool=Tableau` or `tool=tableau`).
pub fn find_tool(identifier: &str) -> Option<&'static Tool> {
    let wanted = identifier.trim();
    TOOLS.iter().find(|t| {
        t.name.eq_ignore_ascii_case(wanted)
            || t.adapter_key.is_some_and(|k| k.eq_ignore_ascii_case(wanted))
    })
}
