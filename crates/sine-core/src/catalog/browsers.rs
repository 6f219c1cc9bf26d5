use super::{BrowserDefinition, Channel, PerOs};

pub static BROWSERS: &[BrowserDefinition] = &[
    BrowserDefinition {
        name: "Firefox",
        profile: PerOs {
            windows: r"Mozilla\Firefox",
            macos: "Firefox",
            linux: ".mozilla/firefox",
        },
        channels: &[
            Channel {
                name: "Stable",
                install_paths: PerOs {
                    windows: &[
                        r"C:\Program Files\Mozilla Firefox",
                        r"C:\Program Files (x86)\Mozilla Firefox",
                    ],
                    macos: &["/Applications/Firefox.app/Contents/Resources"],
                    linux: &["/usr/lib/firefox/", "/opt/firefox/", "/root/snap/firefox/"],
                },
            },
            Channel {
                name: "Developer Edition",
                install_paths: PerOs {
                    windows: &[
                        r"C:\Program Files\Firefox Developer Edition",
                        r"C:\Program Files (x86)\Firefox Developer Edition",
                    ],
                    macos: &["/Applications/Firefox Developer Edition.app/Contents/Resources"],
                    linux: &["/opt/firefox-developer-edition/"],
                },
            },
            Channel {
                name: "Nightly",
                install_paths: PerOs {
                    windows: &[
                        r"C:\Program Files\Firefox Nightly",
                        r"C:\Program Files (x86)\Firefox Nightly",
                    ],
                    macos: &["/Applications/Firefox Nightly.app/Contents/Resources"],
                    linux: &["/opt/firefox-nightly/"],
                },
            },
        ],
    },
    BrowserDefinition {
        name: "Floorp",
        profile: PerOs {
            windows: "Floorp",
            macos: "Floorp",
            linux: ".floorp",
        },
        channels: &[Channel {
            name: "Stable",
            install_paths: PerOs {
                windows: &[
                    r"C:\Program Files\Ablaze Floorp",
                    r"C:\Program Files (x86)\Ablaze Floorp",
                ],
                macos: &["/Applications/Floorp.app/Contents/Resources"],
                linux: &["/opt/floorp/"],
            },
        }],
    },
    BrowserDefinition {
        name: "Mullvad",
        profile: PerOs {
            windows: r"Mullvad\MullvadBrowser",
            macos: "MullvadBrowser",
            linux: ".mullvad-browser",
        },
        channels: &[
            Channel {
                name: "Stable",
                install_paths: PerOs {
                    windows: &[r"~\AppData\Local\Mullvad\MullvadBrowser\Release"],
                    macos: &["/Applications/Mullvad Browser.app/Contents/Resources"],
                    linux: &["/opt/mullvad-browser/"],
                },
            },
            Channel {
                name: "Alpha",
                install_paths: PerOs {
                    windows: &[r"~\AppData\Local\Mullvad\MullvadBrowser\Alpha"],
                    macos: &["/Applications/Mullvad Browser Alpha.app/Contents/Resources"],
                    linux: &["/opt/mullvad-browser-alpha/"],
                },
            },
        ],
    },
    BrowserDefinition {
        name: "Waterfox",
        profile: PerOs {
            windows: "Waterfox",
            macos: "Waterfox",
            linux: ".waterfox",
        },
        channels: &[Channel {
            name: "Stable",
            install_paths: PerOs {
                windows: &[
                    r"C:\Program Files\Waterfox",
                    r"C:\Program Files (x86)\Waterfox",
                ],
                macos: &["/Applications/Waterfox.app/Contents/Resources"],
                linux: &["/opt/waterfox/"],
            },
        }],
    },
    BrowserDefinition {
        name: "Zen",
        profile: PerOs {
            windows: "zen",
            macos: "Zen",
            linux: ".zen",
        },
        channels: &[
            Channel {
                name: "Beta",
                install_paths: PerOs {
                    windows: &[
                        r"C:\Program Files\Zen Browser",
                        r"C:\Program Files (x86)\Zen Browser",
                    ],
                    macos: &[
                        "/Applications/Zen Browser.app/contents/resources",
                        "/Applications/Zen.app/Contents/Resources",
                    ],
                    linux: &["/opt/zen-browser-bin/", "/opt/zen-browser/", "/opt/zen/"],
                },
            },
            Channel {
                name: "Twilight",
                install_paths: PerOs {
                    windows: &[
                        r"C:\Program Files\Zen Twilight",
                        r"C:\Program Files (x86)\Zen Twilight",
                    ],
                    macos: &[
                        "/Applications/Zen Browser.app/Twilight/contents/resources",
                        "/Applications/Zen.app/Twilight/Contents/Resources",
                        "/Applications/Twilight.app/Contents/Resources",
                    ],
                    linux: &["/opt/zen-twilight/", "/opt/zen-browser-twilight/"],
                },
            },
        ],
    },
];
