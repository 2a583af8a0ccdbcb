//! 场景节点：一个背景层 + 若干挂在背景上的可拖拽精灵。

use bevy::math::Vec2;

/// 场景里的节点标识。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    Background,
    /// 精灵在 `SceneNodes::sprites` 里的下标。
    Sprite(usize),
}

impl NodeId {
    pub fn is_sprite(self) -> bool {
        matches!(self, NodeId::Sprite(_))
    }
}

/// 当前选中的节点；`None` 表示还没有任何手势命中过节点。
pub type Selection = Option<NodeId>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeTransform {
    pub position: Vec2,
    /// 弧度，逆时针为正。
    pub rotation: f32,
}

impl NodeTransform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }
}

/// 背景层：锚点在左下角，`position` 即左下角坐标。
#[derive(Clone, Debug)]
pub struct BackgroundLayer {
    pub image: String,
    pub transform: NodeTransform,
    pub size: Vec2,
}

/// 可拖拽精灵：`position` 相对背景层原点，精灵以此为中心。
#[derive(Clone, Debug)]
pub struct DraggableSprite {
    pub image: String,
    pub transform: NodeTransform,
    pub size: Vec2,
}

/// 场景布局（来自配置文件）。
///
/// 尺寸是图片加载完成前的占位值，加载后由 `SceneController::resize_node` 覆盖。
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayout {
    pub background_image: String,
    pub background_size: Vec2,
    pub sprite_images: Vec<String>,
    pub sprite_size: Vec2,
}

#[derive(Clone, Debug)]
pub struct SceneNodes {
    pub background: BackgroundLayer,
    pub sprites: Vec<DraggableSprite>,
}

impl SceneNodes {
    /// 背景放在原点；精灵沿视口水平中线等距排列，第 i 个位于 `(i+1)/(N+1)` 处。
    pub fn new(viewport: Vec2, layout: &SceneLayout) -> Self {
        let count = layout.sprite_images.len();
        let sprites = layout
            .sprite_images
            .iter()
            .enumerate()
            .map(|(i, image)| {
                let offset_fraction = (i as f32 + 1.0) / (count as f32 + 1.0);
                DraggableSprite {
                    image: image.clone(),
                    transform: NodeTransform::at(Vec2::new(
                        viewport.x * offset_fraction,
                        viewport.y / 2.0,
                    )),
                    size: layout.sprite_size,
                }
            })
            .collect();

        Self {
            background: BackgroundLayer {
                image: layout.background_image.clone(),
                transform: NodeTransform::default(),
                size: layout.background_size,
            },
            sprites,
        }
    }

    /// 背景 + 精灵总数。
    pub fn node_count(&self) -> usize {
        1 + self.sprites.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(NodeId::Background).chain((0..self.sprites.len()).map(NodeId::Sprite))
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        match id {
            NodeId::Background => Some(self.background.image.as_str()),
            NodeId::Sprite(i) => self.sprites.get(i).map(|s| s.image.as_str()),
        }
    }

    pub fn transform(&self, id: NodeId) -> Option<&NodeTransform> {
        match id {
            NodeId::Background => Some(&self.background.transform),
            NodeId::Sprite(i) => self.sprites.get(i).map(|s| &s.transform),
        }
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut NodeTransform> {
        match id {
            NodeId::Background => Some(&mut self.background.transform),
            NodeId::Sprite(i) => self.sprites.get_mut(i).map(|s| &mut s.transform),
        }
    }

    pub fn size(&self, id: NodeId) -> Option<Vec2> {
        match id {
            NodeId::Background => Some(self.background.size),
            NodeId::Sprite(i) => self.sprites.get(i).map(|s| s.size),
        }
    }

    pub fn size_mut(&mut self, id: NodeId) -> Option<&mut Vec2> {
        match id {
            NodeId::Background => Some(&mut self.background.size),
            NodeId::Sprite(i) => self.sprites.get_mut(i).map(|s| &mut s.size),
        }
    }

    /// 精灵中心点的场景坐标（背景位置 + 相对位置）。
    pub fn sprite_scene_position(&self, index: usize) -> Option<Vec2> {
        self.sprites
            .get(index)
            .map(|s| self.background.transform.position + s.transform.position)
    }

    /// 命中测试（场景坐标）：后加入的精灵在上层，优先命中；都没命中再看背景。
    ///
    /// 只用轴对齐包围盒，不考虑旋转（摆动角度只有几度）。
    pub fn node_at(&self, point: Vec2) -> Option<NodeId> {
        for (i, sprite) in self.sprites.iter().enumerate().rev() {
            let center = self.background.transform.position + sprite.transform.position;
            let half = sprite.size * 0.5;
            if point_in_frame(point, center - half, center + half) {
                return Some(NodeId::Sprite(i));
            }
        }

        let min = self.background.transform.position;
        if point_in_frame(point, min, min + self.background.size) {
            return Some(NodeId::Background);
        }
        None
    }
}

fn point_in_frame(p: Vec2, min: Vec2, max: Vec2) -> bool {
    p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
}
