//! Every patch shipped for `LEGO Bionicle.exe`, build 2001-10-23.
//!
//! Offsets are file offsets. The virtual address of each site is in the
//! comment next to it.

use crate::{Edit, Patch, PatchSet, Result};
use once_cell::sync::OnceCell;

/// Returns the registry, sorted by id. Built on first use.
pub fn patches() -> Result<&'static PatchSet> {
    static PATCHES: OnceCell<PatchSet> = OnceCell::new();
    PATCHES.get_or_try_init(|| PatchSet::new(CATALOG.iter().copied()))
}

pub const CATALOG: &[Patch] = &[
    WIN10,
    MATORAN_RGB,
    SOUND_TABLE_AMOUNT,
    DEBUG_PRINT,
    SCREEN_RES_4,
    SCREEN_RES_INI,
    HVP,
    DRAGON_MELEE,
];

// Check if the handle is -1 and if so always throw. On Windows 10
// CloseHandle(-1) no longer returns -1.
#[rustfmt::skip]
const WIN10: Patch = Patch {
    id: "win10",
    description: "Windows 10",
    edits: &[
        Edit::overwrite(0xDB853, &[ // 0x4DC453
            // inserted before existing code
            0x83, 0xBB, 0x24, 0x01, 0x00, 0x00, 0xFF, // cmp    DWORD PTR [ebx+0x124], 0xffffffff
            0x74, 0x04,                               // je     0xd
            // existing code, shifted down with addresses corrected
            0x85, 0xC0,                               // test   eax, eax
            0x75, 0x11,                               // jne    0x1e
            0x68, 0x18, 0x91, 0x83, 0x00,             // push   0x839118
            0x68, 0x40, 0x91, 0x83, 0x00,             // push   0x839140
            0xE8, 0x81, 0xCD, 0xFF, 0xFF,             // call   0xffffcd9d
            0x59,                                     // pop    ecx
            0x59,                                     // pop    ecx
            0xC6, 0x83, 0x20, 0x01, 0x00, 0x00, 0x00, // mov    BYTE PTR [ebx+0x120], 0x0
            0x8D, 0x65, 0xFC,                         // lea    esp, [ebp-0x4]
            0x5B,                                     // pop    ebx
            0x5D,                                     // pop    ebp
            0xC3,                                     // ret
        ]),
    ],
};

// Onu-Matoran texture color
#[rustfmt::skip]
const MATORAN_RGB: Patch = Patch {
    id: "matoranrgb",
    description: "Fix RGB values for Onu-Matoran",
    edits: &[
        Edit::overwrite(0xB6F3, &[ // 0x40C2F3
            0x6A, 0x27, // push   0x27
            0x6A, 0x27, // push   0x27
            0x6A, 0x27, // push   0x27
        ]),
    ],
};

// Expected number of SoundTable entries.
#[rustfmt::skip]
const SOUND_TABLE_AMOUNT: Patch = Patch {
    id: "soundtableamount",
    description: "Avoid SoundTable error message",
    edits: &[
        Edit::overwrite(0x1CC4B4, &[ // 0x5CD0B4
            0x81, 0xBD, 0xD4, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        ]),
    ],
};

// Open ReleaseInform.txt with "r+b" instead of "w" so it isn't wiped every launch.
#[rustfmt::skip]
const DEBUG_PRINT: Patch = Patch {
    id: "debugprint",
    description: "Append data to ReleaseInform.txt",
    edits: &[
        Edit::overwrite(0x6C9E7, &[ // 0x46D5E7
            0x68, 0x38, 0x75, 0x74, 0x00, // push   offset aRB ; "r+b"
        ]),
    ],
};

// Default resolution index 2 -> 4 (the max).
#[rustfmt::skip]
const SCREEN_RES_4: Patch = Patch {
    id: "screenres4",
    description: "Set default screen resolution to 4",
    edits: &[
        Edit::overwrite(0x347F2C, &[0x04]), // 0x74A32C
    ],
};

#[rustfmt::skip]
const SCREEN_RES_INI: Patch = Patch {
    id: "screenresini",
    description: "Allow ini to control screen resolution",
    edits: &[
        // AppMain: GcGraphicsOptions::GetScreenResolution -> 0, which hits the
        // default switch case and keeps the values read from the ini
        Edit::overwrite(0x13772D, &[ // 0x53832D
            0xB8, 0x00, 0x00, 0x00, 0x00, // mov    eax, 0x0
        ]),
        // ScDrawableContext::Reset: replace the GetScreenResolution switch with a
        // call to GcSaver::GetScreenData(&width, &height, then 5 throwaway pointers).
        // The throwaway slot is stack space that gets overwritten after the call.
        Edit::nop_pad(0x1585D0, &[ // 0x5591D0
            0x8D, 0x85, 0x48, 0xFF, 0xFF, 0xFF, // lea    eax, [ebp-0xB8]
            0x50,                               // push   eax
            0x50,                               // push   eax
            0x50,                               // push   eax
            0x50,                               // push   eax
            0x50,                               // push   eax
            0x8D, 0x85, 0x44, 0xFF, 0xFF, 0xFF, // lea    eax, [ebp-0xBC]
            0x50,                               // push   eax
            0x8D, 0x85, 0x40, 0xFF, 0xFF, 0xFF, // lea    eax, [ebp-0xC0]
            0x50,                               // push   eax
            0xE8, 0x92, 0xBE, 0x07, 0x00,       // call   ?GetScreenData@GcSaver@@SAXAAG0AAE1111@Z
            0x83, 0xC4, 0x1C,                   // add    esp, 0x1C
        ], 0x6A),
    ],
};

// The game draws with negative near and far clip planes, which no known card
// handles in hardware vertex processing mode. Undo all the world inversion
// that goes with it.
#[rustfmt::skip]
const HVP: Patch = Patch {
    id: "hvp",
    description: "Hardward vertex processing",
    edits: &[
        // GcViewPort::GcViewPort, negative clip on the camera: GetSVP -> 1
        Edit::overwrite(0x470E0, &[ // 0x447CE0
            0xB0, 0x01, // mov    al, 0x1
            0x90,       // nop
            0x90,       // nop
            0x90,       // nop
        ]),
        // GcLegoCamera::BuildViewMatrix, inverted view matrix: GetSVP -> 1
        Edit::overwrite(0x5A2A2, &[ // 0x45AEA2
            0xB0, 0x01, // mov    al, 0x1
            0x90,       // nop
            0x90,       // nop
            0x90,       // nop
        ]),
        // GcAreaDirector::SetFog, inverted fog values: GetSVP -> 1
        Edit::overwrite(0x89BA7, &[ // 0x48A7A7
            0xB0, 0x01, // mov    al, 0x1
            0x90,       // nop
            0x90,       // nop
            0x90,       // nop
        ]),
        // ScPerspectiveCamera::BuildProjectionMatrix, inverted projection: GetSVP -> 1
        Edit::overwrite(0x94866, &[ // 0x495466
            0xB0, 0x01, // mov    al, 0x1
            0x90,       // nop
            0x90,       // nop
            0x90,       // nop
        ]),
        // GcGraphicsOptions::GetDrawDistance: drop the sign flip so the far clip isn't infinite
        Edit::overwrite(0x1E46E6, &[ // 0x5E52E6
            0x90, // nop
            0x90, // nop
        ]),
        // GcSprite::Render: ScMatrix::RotateZ(PI) -> RotateZ(0.0), stops sprites rendering upside down
        Edit::overwrite(0x32D090, &[ // 0x72F490
            0x00, 0x00, 0x00, 0x00, // float 0.0
        ]),
    ],
};

// GcToa::CheckNearCharacters only looks at characters with an 'aiin'
// controller, which the dragon can't have. Special-case its id 'drag' in the
// 10 bytes of redundant code at this spot.
#[rustfmt::skip]
const DRAGON_MELEE: Patch = Patch {
    id: "dragonmelee",
    description: "Dragon melee attack fix",
    edits: &[
        Edit::overwrite(0x16DE25, &[ // 0x56EA25
            0x8B, 0x45, 0xD0,             // mov    eax, [ebp-0x30]
            0x3D, 0x67, 0x61, 0x72, 0x64, // cmp    eax, 0x64726167 ; 'drag'
            0x74, 0x26,                   // je     0x28
        ]),
    ],
};
