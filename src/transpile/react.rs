//! Names and import lines of the target framework.

/// Navigation primitive substituted for internal hyperlinks.
pub const NAV_ELEMENT: &str = "Link";
/// Attribute carrying the navigation target.
pub const NAV_ATTR: &str = "to";
/// Metadata/head primitive wrapping relocated head content.
pub const HEAD_ELEMENT: &str = "Helmet";

/// Reserved function/module name of the entry document.
pub const ENTRY_COMPONENT: &str = "App";
/// Aggregate entry module (route table), relative to the output `src/`.
pub const ROUTES_MODULE: &str = "index.js";
/// Extension of generated modules.
pub const MODULE_EXT: &str = "js";
/// Appended to a root page module that would shadow `App.js` or `index.js`.
pub const PAGE_SUFFIX: &str = "Page";
/// Prefix of route table identifiers.
pub const ROUTE_IDENT_PREFIX: &str = "Page_";

pub const IMPORT_BASE: &str = "import React from \"react\";";
pub const IMPORT_EFFECT: &str = "import React, { useEffect } from \"react\";";
pub const IMPORT_NAV: &str = "import { Link } from \"react-router-dom\";";
pub const IMPORT_HEAD: &str = "import { Helmet } from \"react-helmet\";";
