//! Skinned page entities driven by the page-curl [`Book`]
//!
//! Each page is a root entity, a chain of joint entities parented one to the
//! next, and three skinned meshes (front, back, edges) bound to that chain.
//! Every frame the book is ticked with the current page, and the pose of each
//! page rig is copied onto its joint transforms for Bevy's skinning.

use bevy::camera::visibility::NoFrustumCulling;
use bevy::ecs::message::Message;
use bevy::mesh::skinning::{SkinnedMesh, SkinnedMeshInverseBindposes};
use bevy::prelude::*;
use flipbook_config::BookConfig;
use page_curl::{Book, BoneChain, Page, PageGeometry, PageSheet, SheetFace};

/// Reading position of the book, in `[0, page_count]`.
///
/// Owned by the host (input handling, UI, scripts). Out-of-range values are
/// clamped when applied.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrentPage(pub usize);

/// Anchor entity all page roots are parented to.
///
/// Rotated so the closed book faces +Z with the spine along Y.
#[derive(Component, Debug, Clone, Copy)]
pub struct BookRoot;

/// Root entity of one page
#[derive(Component, Debug, Clone, Copy)]
pub struct PageRoot {
    pub index: usize,
}

/// Marker for joint entities of a page rig
#[derive(Component, Debug, Clone, Copy)]
pub struct PageJoint {
    pub page: usize,
    pub joint: usize,
}

/// Joint entities of a page, in chain order
#[derive(Component, Debug, Clone, Default)]
pub struct PageJoints(pub Vec<Entity>);

/// Message sent when the applied reading position changes
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChanged {
    pub previous: usize,
    pub current: usize,
}

/// Build the book for `config`, opened at its start page.
///
/// Pages stay unrealized until [`spawn_book`] creates their entities. An
/// invalid geometry falls back to the reference page.
pub fn book_from_config(config: &BookConfig) -> Book {
    let geometry = match config.page_geometry() {
        Ok(geometry) => geometry,
        Err(err) => {
            warn!("{}, using default page geometry", err);
            PageGeometry::default()
        }
    };

    let mut book = Book::deferred(geometry, config.curl, config.page_count());
    book.open_at(config.start_page);
    book
}

/// Build the shared sheet meshes and spawn every page of the book
pub fn spawn_book(
    mut commands: Commands,
    mut book: ResMut<Book>,
    config: Res<BookConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut inverse_bindposes: ResMut<Assets<SkinnedMeshInverseBindposes>>,
) {
    let sheet = PageSheet::build(book.geometry());
    let rest_chain = BoneChain::from_geometry(book.geometry());

    let bindposes: Vec<Mat4> = rest_chain
        .inverse_bind_matrices()
        .iter()
        .map(|matrix| Mat4::from_cols_array(&matrix.to_cols_array()))
        .collect();
    let bindposes = inverse_bindposes.add(SkinnedMeshInverseBindposes::from(bindposes));

    let face_meshes: Vec<(SheetFace, Handle<Mesh>)> = SheetFace::ALL
        .iter()
        .map(|&face| (face, meshes.add(sheet.to_bevy_mesh(face))))
        .collect();

    let paper = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.1,
        ..default()
    });
    let edge = materials.add(StandardMaterial {
        base_color: Color::srgb(0.92, 0.91, 0.88),
        perceptual_roughness: 0.8,
        ..default()
    });

    let anchor = commands
        .spawn((
            Transform::from_rotation(Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2)),
            Visibility::default(),
            BookRoot,
            Name::new("Book"),
        ))
        .id();

    for index in 0..book.page_count() {
        let label = config
            .catalog
            .get(index)
            .map(|page| format!("Page_{} ({} / {})", index, page.front, page.back))
            .unwrap_or_else(|| format!("Page_{}", index));

        let root = commands
            .spawn((
                Transform::default(),
                Visibility::default(),
                PageRoot { index },
                Name::new(label),
                ChildOf(anchor),
            ))
            .id();

        let mut joints = Vec::with_capacity(rest_chain.len());
        let mut parent = root;
        for (k, joint) in rest_chain.joints().iter().enumerate() {
            let entity = commands
                .spawn((
                    Transform::from_xyz(joint.offset, 0.0, 0.0),
                    PageJoint {
                        page: index,
                        joint: k,
                    },
                    ChildOf(parent),
                ))
                .id();
            joints.push(entity);
            parent = entity;
        }

        for (face, mesh) in &face_meshes {
            let material = match face {
                SheetFace::Front | SheetFace::Back => paper.clone(),
                SheetFace::Edge => edge.clone(),
            };
            commands.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material),
                SkinnedMesh {
                    inverse_bindposes: bindposes.clone(),
                    joints: joints.clone(),
                },
                // Skinned bounds change while the page turns
                NoFrustumCulling,
                ChildOf(root),
            ));
        }

        commands.entity(root).insert(PageJoints(joints));
        book.realize_page(index);
    }

    info!(
        "Spawned book: {} pages, {} joints each",
        book.page_count(),
        rest_chain.len()
    );
}

/// Advance the book to the current page and report page changes
pub fn tick_book(
    time: Res<Time>,
    current: Res<CurrentPage>,
    mut book: ResMut<Book>,
    mut changed: MessageWriter<PageChanged>,
) {
    let previous = book.current_page();
    book.tick(current.0, time.delta_secs());

    if book.current_page() != previous {
        changed.write(PageChanged {
            previous,
            current: book.current_page(),
        });
    }
}

/// Copy each realized page rig onto its joint transforms
pub fn sync_page_joints(
    book: Res<Book>,
    pages: Query<(&PageRoot, &PageJoints)>,
    mut joints: Query<&mut Transform, With<PageJoint>>,
) {
    for (root, page_joints) in pages.iter() {
        let Some(rig) = book.page(root.index).and_then(Page::rig) else {
            continue;
        };

        for (k, (&entity, joint)) in page_joints.0.iter().zip(rig.joints()).enumerate() {
            if let Ok(mut transform) = joints.get_mut(entity) {
                transform.translation = rig.local_translation(k);
                transform.rotation = Quat::from_rotation_y(joint.angle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use bevy::time::TimeUpdateStrategy;
    use page_curl::CurlProfile;
    use std::f32::consts::FRAC_PI_2;
    use std::time::Duration;

    /// App with the per-frame systems and rig-only pages (no render assets)
    fn test_app(book: Book) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
            .init_resource::<CurrentPage>()
            .add_message::<PageChanged>()
            .add_systems(Update, (tick_book, sync_page_joints.after(tick_book)));

        let chain = BoneChain::from_geometry(book.geometry());
        for index in 0..book.page_count() {
            let joints: Vec<Entity> = chain
                .joints()
                .iter()
                .enumerate()
                .map(|(k, joint)| {
                    app.world_mut()
                        .spawn((
                            Transform::from_xyz(joint.offset, 0.0, 0.0),
                            PageJoint { page: index, joint: k },
                        ))
                        .id()
                })
                .collect();
            app.world_mut()
                .spawn((Transform::default(), PageRoot { index }, PageJoints(joints)));
        }

        app.insert_resource(book);
        app
    }

    fn realized_book(page_count: usize) -> Book {
        Book::new(PageGeometry::default(), CurlProfile::default(), page_count)
    }

    fn joint_transforms(app: &mut App, page: usize) -> Vec<Transform> {
        let mut query = app.world_mut().query::<(&PageJoint, &Transform)>();
        let mut joints: Vec<(usize, Transform)> = query
            .iter(app.world())
            .filter(|(joint, _)| joint.page == page)
            .map(|(joint, transform)| (joint.joint, *transform))
            .collect();
        joints.sort_by_key(|(k, _)| *k);
        joints.into_iter().map(|(_, transform)| transform).collect()
    }

    #[test]
    fn test_book_from_config_opens_at_start_page() {
        let config = BookConfig {
            start_page: 3,
            ..default()
        };
        let book = book_from_config(&config);
        assert_eq!(book.current_page(), 3);
        assert_eq!(book.page_count(), 10);
        assert!(book.pages().iter().all(|page| !page.is_realized()));
        assert!(book.page(2).unwrap().state().opened);
    }

    #[test]
    fn test_page_changed_message() {
        let mut app = test_app(realized_book(4));
        app.update();
        app.world_mut().resource_mut::<CurrentPage>().0 = 2;
        app.update();

        let messages = app.world().resource::<Messages<PageChanged>>();
        let mut cursor = messages.get_cursor();
        let received: Vec<PageChanged> = cursor.read(messages).copied().collect();
        assert_eq!(
            received,
            vec![PageChanged {
                previous: 0,
                current: 2
            }]
        );
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let mut app = test_app(realized_book(4));
        app.world_mut().resource_mut::<CurrentPage>().0 = 40;
        app.update();

        let book = app.world().resource::<Book>();
        assert_eq!(book.current_page(), 4);
        let state = book.page(3).unwrap().state();
        assert!(state.opened);
        assert!(state.book_closed);
    }

    #[test]
    fn test_joint_transforms_follow_rigs() {
        let mut app = test_app(realized_book(2));
        for _ in 0..1000 {
            app.update();
        }

        let joints = joint_transforms(&mut app, 1);
        let root = joints[0];
        assert!(root.rotation.angle_between(Quat::from_rotation_y(FRAC_PI_2)) < 1e-4);
        // Stack offset of page 1 on the front cover, along the swung normal (+X)
        assert!((root.translation - Vec3::new(-0.003, 0.0, 0.0)).length() < 1e-5);

        let tip = joints.last().copied().unwrap();
        assert!(tip.rotation.angle_between(Quat::IDENTITY) < 1e-4);
    }

    #[test]
    fn test_unrealized_pages_keep_rest_pose() {
        let book = Book::deferred(PageGeometry::default(), CurlProfile::default(), 3);
        let mut app = test_app(book);
        app.world_mut().resource_mut::<CurrentPage>().0 = 1;
        for _ in 0..10 {
            app.update();
        }

        assert!(app.world().resource::<Book>().page(0).unwrap().state().opened);
        for transform in joint_transforms(&mut app, 0) {
            assert_eq!(transform.rotation, Quat::IDENTITY);
        }
    }
}
