//! Assets captured in the snapshot, in audit order.

use super::AssetCategory;

pub(super) const PAGES: &[&str] = &["index.html", "capra.html", "msg.html", "proxy.html"];

pub(super) const CSS: &[&str] = &[
    "css2(2)",
    "css2(3)",
    "css2(1)",
    "css2",
    "index-KzK_8K8B.css",
];

pub(super) const JS: &[&str] = &[
    "index-BMgX3D-v.js.download",
    "googleapis.proxy.js.download",
    "js",
    "lazy.min.js.download",
    "cb=gapi.loaded_0",
    "cb=gapi.loaded_1",
    "cb=gapi(1).loaded_0",
];

pub(super) const IMAGES: &[&str] = &[
    "192px.svg",
    "typescript.svg",
    "firebase.svg",
    "next.svg",
    "nodejs.svg",
    "react_ts.svg",
    "css.svg",
    "image.svg",
    "file.svg",
    "unnamed.jpg",
    "unnamed(1).jpg",
    "icon-192.png",
];

pub(super) const GROUPS: &[(AssetCategory, &[&str])] = &[
    (AssetCategory::Page, PAGES),
    (AssetCategory::Css, CSS),
    (AssetCategory::Js, JS),
    (AssetCategory::Image, IMAGES),
];
